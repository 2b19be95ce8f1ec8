//! Form validation for the student pages.
//!
//! Rules are looked up by field name (`email`, `phone`, `cgpa`,
//! `student_id`) and run in a fixed order, stopping at the first failure.
//! Errors are shown Bootstrap-style: the control gets `is-invalid` and a
//! `div.invalid-feedback` with the message is appended to its parent.
//!
//! # Example
//!
//! ```ignore
//! use sms_enhance::validation::{validate_field, validate_form};
//!
//! dom.write(|doc| validate_field(doc, "student-id"))?;
//!
//! let result = dom.write(|doc| validate_form(doc, "student-form"))?;
//! if result.is_invalid() {
//!     focus(result.first_invalid_element());
//! }
//! ```

mod binding;
mod field;
mod form;
mod guard;
mod result;
pub mod rules;

pub use binding::{FORMS, bind_form, bind_forms};
pub use field::{FEEDBACK_CLASS, FEEDBACK_FOR_ATTR, INVALID_CLASS, clear_field, descriptor, has_error, validate_field};
pub use form::{CONTROLS, controls, validate_form};
pub use guard::{BLOCKED_MESSAGE, GuardState, SubmissionGuard, SubmitDecision};
pub use result::{FieldError, ValidationResult};
pub use rules::{FieldDescriptor, FieldKind, Verdict, evaluate};
