//! AJAX delete with confirmation.

use std::sync::Arc;
use std::time::Duration;

use crate::navigate::Navigator;
use crate::notify::{self, Banners, Severity};
use crate::portal::Portal;

pub const CONFIRM_PROMPT: &str = "Are you sure you want to delete this student?";
pub const DELETE_FAILED: &str = "An error occurred while deleting the student.";

/// Asks the user a yes/no question.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// How a delete attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined the confirmation; no request was sent.
    Cancelled,
    /// The server deleted the record; a reload is scheduled.
    Deleted(String),
    /// The server refused, with its reason.
    Rejected(String),
    /// The request or the response decoding failed.
    Failed,
}

/// Deletes students and reports the result with banners.
#[derive(Clone)]
pub struct DeleteController {
    portal: Arc<dyn Portal>,
    navigator: Arc<dyn Navigator>,
    confirm: Arc<dyn Confirm>,
    banners: Banners,
    reload_delay: Duration,
}

impl DeleteController {
    pub fn new(
        portal: Arc<dyn Portal>,
        navigator: Arc<dyn Navigator>,
        confirm: Arc<dyn Confirm>,
        banners: Banners,
        reload_delay: Duration,
    ) -> Self {
        Self {
            portal,
            navigator,
            confirm,
            banners,
            reload_delay,
        }
    }

    /// Confirm, then delete `student_id`.
    ///
    /// On success the page reloads after the configured delay.
    pub async fn delete_student(&self, student_id: u64) -> DeleteOutcome {
        if !self.confirm.confirm(CONFIRM_PROMPT) {
            log::debug!("[delete] student {student_id} cancelled");
            return DeleteOutcome::Cancelled;
        }

        let outcome = match self.portal.delete_student(student_id).await {
            Ok(response) if response.success => {
                self.banner(&response.message, Severity::Success);
                let navigator = Arc::clone(&self.navigator);
                notify::schedule(self.reload_delay, move || navigator.reload());
                DeleteOutcome::Deleted(response.message)
            }
            Ok(response) => {
                self.banner(&response.message, Severity::Danger);
                DeleteOutcome::Rejected(response.message)
            }
            Err(e) => {
                log::error!("Delete of student {student_id} failed: {e}");
                self.banner(DELETE_FAILED, Severity::Danger);
                DeleteOutcome::Failed
            }
        };

        log::debug!("[delete] student {student_id}: {outcome:?}");
        outcome
    }

    fn banner(&self, message: &str, severity: Severity) {
        if let Err(e) = self.banners.show(message, severity) {
            log::warn!("[delete] could not show banner: {e}");
        }
    }
}

impl std::fmt::Debug for DeleteController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeleteController")
            .field("reload_delay", &self.reload_delay)
            .finish()
    }
}
