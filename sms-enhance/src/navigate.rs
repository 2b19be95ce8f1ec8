//! Page location and navigation.

use std::sync::{Arc, PoisonError, RwLock};

use url::Url;

/// The page's location bar.
///
/// Implementations decide what "navigating" means: a browser binding
/// assigns `window.location`, a headless page records the history.
pub trait Navigator: Send + Sync {
    /// The current page URL.
    fn location(&self) -> Url;

    /// Navigate to `url`.
    fn assign(&self, url: Url);

    /// Reload the current page.
    fn reload(&self);
}

#[derive(Debug)]
struct History {
    location: Url,
    visited: Vec<Url>,
    reloads: usize,
}

/// A navigator that keeps its history in memory.
#[derive(Debug, Clone)]
pub struct MemoryNavigator {
    inner: Arc<RwLock<History>>,
}

impl MemoryNavigator {
    pub fn new(location: Url) -> Self {
        Self {
            inner: Arc::new(RwLock::new(History {
                location,
                visited: Vec::new(),
                reloads: 0,
            })),
        }
    }

    /// Every URL assigned so far, oldest first.
    pub fn visited(&self) -> Vec<Url> {
        self.inner
            .read()
            .map(|h| h.visited.clone())
            .unwrap_or_default()
    }

    /// Number of reloads requested.
    pub fn reloads(&self) -> usize {
        self.inner.read().map(|h| h.reloads).unwrap_or(0)
    }
}

impl Navigator for MemoryNavigator {
    fn location(&self) -> Url {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .location
            .clone()
    }

    fn assign(&self, url: Url) {
        log::debug!("[navigate] -> {url}");
        let mut history = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        history.location = url.clone();
        history.visited.push(url);
    }

    fn reload(&self) {
        log::debug!("[navigate] reload");
        let mut history = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        history.reloads += 1;
    }
}
