//! Whole-form validation.

use pagedom::{Document, DomError, Selector};

use super::field;
use super::result::{FieldError, ValidationResult};

/// Controls that take part in validation.
pub const CONTROLS: &str = "input, select, textarea";

/// IDs of the validatable controls inside `form`, in document order.
pub fn controls(doc: &Document, form: &str) -> Result<Vec<String>, DomError> {
    doc.select_within(form, &Selector::parse(CONTROLS)?)
}

/// Validate every control in `form`.
///
/// There is no early exit: every control is validated and annotated so all
/// problems are visible at once.
pub fn validate_form(doc: &mut Document, form: &str) -> Result<ValidationResult, DomError> {
    let mut errors = Vec::new();

    for id in controls(doc, form)? {
        let verdict = field::validate_field(doc, &id)?;
        if let Some(message) = verdict.message {
            errors.push(FieldError {
                field_name: doc.element(&id)?.name().to_string(),
                element_id: id,
                message,
            });
        }
    }

    Ok(ValidationResult::from_errors(errors))
}
