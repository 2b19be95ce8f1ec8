//! Submit-time gate for a form.

use pagedom::Dom;

use super::form::validate_form;
use super::result::ValidationResult;
use crate::error::Error;
use crate::notify::{Banners, Severity};

/// Banner shown when a submission is blocked.
pub const BLOCKED_MESSAGE: &str = "Please correct the errors below.";

/// Where a form's submission attempt stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GuardState {
    /// No submission attempted yet.
    #[default]
    Idle,
    /// Running the form validator.
    Validating,
    /// The last attempt failed validation; the user stays on the page.
    Blocked,
    /// The last attempt passed; the browser carries on with the submission.
    Submitting,
}

/// What the caller should do with the submit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Let the default submission happen.
    Proceed,
    /// Cancel the default submission.
    Block(ValidationResult),
}

impl SubmitDecision {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Block(_))
    }
}

/// Intercepts submission of one form.
///
/// Each attempt is a single synchronous pass: validate every control, then
/// either block (one danger banner, per-field messages stay visible) or let
/// the submission through untouched. There is no retry.
#[derive(Debug, Clone)]
pub struct SubmissionGuard {
    form: String,
    banners: Banners,
    state: GuardState,
}

impl SubmissionGuard {
    pub fn new(form: impl Into<String>, banners: Banners) -> Self {
        Self {
            form: form.into(),
            banners,
            state: GuardState::Idle,
        }
    }

    pub fn form(&self) -> &str {
        &self.form
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Handle one submission attempt.
    pub fn on_submit(&mut self, dom: &Dom) -> Result<SubmitDecision, Error> {
        self.transition(GuardState::Validating);

        let result = match dom.write(|doc| validate_form(doc, &self.form)) {
            Ok(result) => result,
            Err(e) => {
                self.transition(GuardState::Idle);
                return Err(e.into());
            }
        };

        if result.is_valid() {
            self.transition(GuardState::Submitting);
            return Ok(SubmitDecision::Proceed);
        }

        self.transition(GuardState::Blocked);
        if let Err(e) = self.banners.show(BLOCKED_MESSAGE, Severity::Danger) {
            log::warn!("[guard] {}: could not show banner: {e}", self.form);
        }
        Ok(SubmitDecision::Block(result))
    }

    fn transition(&mut self, next: GuardState) {
        log::debug!("[guard] {}: {:?} -> {:?}", self.form, self.state, next);
        self.state = next;
    }
}
