//! Dismissible notification banners.

use std::time::Duration;

use pagedom::{Dom, DomError, Element};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::error::Error;

/// Selector of the element banners are prepended to.
pub const CONTAINER: &str = ".container";

/// Banner colour, as a Bootstrap contextual class (`alert-<severity>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Danger,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// Build the banner element for `message`.
pub fn banner(message: impl Into<String>, severity: Severity) -> Element {
    Element::div()
        .class("alert")
        .class(format!("alert-{}", severity.as_str()))
        .class("alert-dismissible fade show")
        .attr("role", "alert")
        .child(Element::span().text(message))
        .child(
            Element::new("button")
                .class("btn-close")
                .attr("type", "button")
                .attr("data-bs-dismiss", "alert")
                .attr("aria-label", "Close"),
        )
}

/// Shows banners at the top of the page container.
///
/// Every trigger prepends its own banner; nothing is deduplicated, so
/// banners fired in quick succession stack up until they expire.
///
/// # Example
///
/// ```ignore
/// let banners = Banners::new(dom.clone(), Duration::from_secs(5));
/// banners.show("Student saved.", Severity::Success)?;
/// ```
#[derive(Debug, Clone)]
pub struct Banners {
    dom: Dom,
    dismiss_after: Duration,
}

impl Banners {
    pub fn new(dom: Dom, dismiss_after: Duration) -> Self {
        Self { dom, dismiss_after }
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// Prepend a banner and schedule its removal. Returns the banner's ID.
    pub fn show(&self, message: impl Into<String>, severity: Severity) -> Result<String, Error> {
        let message = message.into();
        let el = banner(message.as_str(), severity);
        let id = el.id.clone();

        self.dom.write(|doc| {
            let container = doc
                .query(CONTAINER)?
                .ok_or_else(|| Error::MissingElement(CONTAINER.to_string()))?;
            doc.prepend_child(&container, el)?;
            Ok::<_, Error>(())
        })?;

        log::debug!("[banner] {} {:?}: {}", id, severity, message);
        self.dismiss_later(id.clone());
        Ok(id)
    }

    /// Remove a banner now. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: &str) -> bool {
        dismiss(&self.dom, id)
    }

    fn dismiss_later(&self, id: String) {
        let dom = self.dom.clone();
        schedule(self.dismiss_after, move || dismiss(&dom, &id));
    }
}

fn dismiss(dom: &Dom, id: &str) -> bool {
    match dom.write(|doc| doc.remove(id)) {
        Ok(_) => true,
        Err(DomError::UnknownElement(_)) => false,
        Err(e) => {
            log::warn!("[banner] could not dismiss {id}: {e}");
            false
        }
    }
}

/// Run `f` after `delay` on the current tokio runtime.
///
/// Without a runtime there is nothing to drive the timer; the call is
/// skipped and logged.
pub(crate) fn schedule<T, F>(delay: Duration, f: F) -> Option<JoinHandle<T>>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            f()
        })),
        Err(_) => {
            log::warn!("no tokio runtime; timer of {delay:?} not scheduled");
            None
        }
    }
}
