//! Search-as-you-type with a debounce.

use std::sync::Arc;
use std::time::Duration;

use sms_client::query;
use tokio::task::JoinHandle;

use crate::navigate::Navigator;
use crate::notify;

/// Selector of the list page's search box.
pub const SEARCH_INPUT: &str = r#"input[name="search"]"#;

/// Navigates to the filtered list once typing pauses.
///
/// Each keystroke cancels the pending search and schedules a new one, so
/// only the last keystroke of a burst navigates. The timer handle is owned
/// by this controller; drop it to cancel any pending search.
pub struct SearchController {
    navigator: Arc<dyn Navigator>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl SearchController {
    pub fn new(navigator: Arc<dyn Navigator>, delay: Duration) -> Self {
        Self {
            navigator,
            delay,
            pending: None,
        }
    }

    /// Handle a keystroke; `value` is the search box's full current value.
    pub fn on_input(&mut self, value: &str) {
        self.cancel();

        let navigator = Arc::clone(&self.navigator);
        let value = value.to_string();

        self.pending = notify::schedule(self.delay, move || {
            let url = query::search_url(&navigator.location(), &value);
            log::debug!("[search] {value:?} -> {url}");
            navigator.assign(url);
        });
    }

    /// Cancel the pending search, if any.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }

    /// Whether a search is scheduled and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| !p.is_finished())
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}
