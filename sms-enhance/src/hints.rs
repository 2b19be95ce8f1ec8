//! Tooltip and popover handles, and alert auto-dismiss.

use std::time::Duration;

use pagedom::{Dom, DomError};
use tokio::task::JoinHandle;

use crate::notify;

/// Selector of server-rendered and script-created alerts.
pub const ALERTS: &str = ".alert";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HintKind {
    Tooltip,
    Popover,
}

impl HintKind {
    /// The `data-bs-toggle` value that marks this kind of hint.
    pub fn toggle(self) -> &'static str {
        match self {
            Self::Tooltip => "tooltip",
            Self::Popover => "popover",
        }
    }

    fn selector(self) -> String {
        format!(r#"[data-bs-toggle="{}"]"#, self.toggle())
    }
}

/// An element that shows a tooltip or popover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub kind: HintKind,
    pub element_id: String,
    /// Text the hint shows, from the element's `title` attribute.
    pub title: Option<String>,
}

/// Collect every tooltip, then every popover, on the page.
pub fn collect_hints(dom: &Dom) -> Result<Vec<Hint>, DomError> {
    dom.read(|doc| {
        let mut hints = Vec::new();
        for kind in [HintKind::Tooltip, HintKind::Popover] {
            for id in doc.query_all(&kind.selector())? {
                let title = doc.get(&id).and_then(|el| el.get_attr("title")).map(str::to_string);
                hints.push(Hint {
                    kind,
                    element_id: id,
                    title,
                });
            }
        }
        Ok::<_, DomError>(hints)
    })
}

/// Remove every alert on the page once `delay` has elapsed.
///
/// Alerts are looked up when the timer fires, so banners shown in the
/// meantime are closed too. The task yields how many were removed; `None`
/// means there is no runtime to drive the timer.
pub fn dismiss_alerts_after(dom: &Dom, delay: Duration) -> Option<JoinHandle<usize>> {
    let dom = dom.clone();
    notify::schedule(delay, move || {
        dom.write(|doc| {
            let alerts = match doc.query_all(ALERTS) {
                Ok(alerts) => alerts,
                Err(e) => {
                    log::warn!("[alerts] {e}");
                    return 0;
                }
            };

            let mut removed = 0;
            for id in &alerts {
                if doc.remove(id).is_ok() {
                    log::debug!("[alerts] dismissed {id}");
                    removed += 1;
                }
            }
            removed
        })
    })
}
