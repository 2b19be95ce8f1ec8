//! Display formatting for phone numbers and dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format a North American phone number.
///
/// Ten digits become `(AAA) BBB-CCCC`, eleven digits with a leading `1`
/// become `+1 (AAA) BBB-CCCC`. Anything else is returned unchanged.
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        10 => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        11 if digits.starts_with('1') => {
            format!("+1 ({}) {}-{}", &digits[1..4], &digits[4..7], &digits[7..])
        }
        _ => phone.to_string(),
    }
}

/// Format an ISO 8601 date or datetime as `Month D, YYYY`.
///
/// Returns `None` when `value` is not a recognised date.
pub fn format_date(value: &str) -> Option<String> {
    let value = value.trim();

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })?;

    Some(date.format("%B %-d, %Y").to_string())
}
