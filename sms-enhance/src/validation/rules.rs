//! Field rules, dispatched by field kind.

use std::sync::LazyLock;

use pagedom::Element;
use regex::Regex;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const INVALID_PHONE: &str = "Please enter a valid phone number.";
pub const INVALID_CGPA: &str = "CGPA must be between 0.00 and 4.00.";
pub const SHORT_STUDENT_ID: &str = "Student ID must be at least 3 characters long.";

const CGPA_MIN: f64 = 0.0;
const CGPA_MAX: f64 = 4.0;
const STUDENT_ID_MIN_LEN: usize = 3;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

// Accepts strings with no digits at all ("()--").
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\+]?[0-9\s\-\(\)]+$").expect("valid phone pattern"));

/// Which kind-specific rule applies to a field, derived from its `name`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FieldKind {
    #[default]
    Generic,
    Email,
    Phone,
    Cgpa,
    StudentId,
}

impl FieldKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "email" => Self::Email,
            "phone" => Self::Phone,
            "cgpa" => Self::Cgpa,
            "student_id" => Self::StudentId,
            _ => Self::Generic,
        }
    }

    fn rule(self) -> Option<Rule> {
        match self {
            Self::Generic => None,
            Self::Email => Some(email),
            Self::Phone => Some(phone),
            Self::Cgpa => Some(cgpa),
            Self::StudentId => Some(student_id),
        }
    }
}

/// Normalized view of one form control, built on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub value: String,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: FieldKind::from_name(&name),
            name,
            value: value.into(),
            required: false,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn from_element(el: &Element) -> Self {
        Self::new(el.name(), el.value.as_str()).required(el.has_attr("required"))
    }
}

/// Pass/fail outcome of the rules for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
    pub valid: bool,
    pub message: Option<String>,
}

impl Verdict {
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// A kind-specific rule over the trimmed, non-empty value.
type Rule = fn(&str) -> Result<(), &'static str>;

/// Evaluate the rules for `field`, stopping at the first failure.
pub fn evaluate(field: &FieldDescriptor) -> Verdict {
    let value = field.value.trim();

    if value.is_empty() {
        return if field.required {
            Verdict::fail(REQUIRED)
        } else {
            Verdict::pass()
        };
    }

    match field.kind.rule().map(|rule| rule(value)) {
        Some(Err(message)) => Verdict::fail(message),
        _ => Verdict::pass(),
    }
}

fn email(value: &str) -> Result<(), &'static str> {
    if EMAIL.is_match(value) {
        Ok(())
    } else {
        Err(INVALID_EMAIL)
    }
}

fn phone(value: &str) -> Result<(), &'static str> {
    if PHONE.is_match(value) {
        Ok(())
    } else {
        Err(INVALID_PHONE)
    }
}

fn cgpa(value: &str) -> Result<(), &'static str> {
    match parse_leading_float(value) {
        Some(n) if (CGPA_MIN..=CGPA_MAX).contains(&n) => Ok(()),
        _ => Err(INVALID_CGPA),
    }
}

fn student_id(value: &str) -> Result<(), &'static str> {
    if value.chars().count() >= STUDENT_ID_MIN_LEN {
        Ok(())
    } else {
        Err(SHORT_STUDENT_ID)
    }
}

/// Parse the longest leading decimal literal of `s`, the way browsers read
/// number fields typed as text: `"3.5abc"` is 3.5, `"abc"` is nothing.
pub fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let unsigned = &s[end..];
    if unsigned.starts_with("Infinity") {
        return s[..end + "Infinity".len()].replace("Infinity", "inf").parse().ok();
    }

    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }

    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}
