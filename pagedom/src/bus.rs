//! Ordered, synchronous event dispatch.

use crate::event::{Event, EventKind};

/// A registered event handler.
pub type Listener = Box<dyn FnMut(&Event, &mut Dispatch) + Send>;

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Per-dispatch state shared by all listeners of one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatch {
    default_prevented: bool,
}

impl Dispatch {
    /// Cancel the element's default action (form submission, link navigation).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

struct Subscription {
    id: ListenerId,
    target: String,
    kind: EventKind,
    listener: Listener,
}

/// Observer registry keyed by target element and event kind.
///
/// Listeners for the same target and kind run in registration order, on the
/// caller's thread, before [`EventBus::dispatch`] returns.
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, target: impl Into<String>, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&Event, &mut Dispatch) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            target: target.into(),
            kind,
            listener: Box::new(listener),
        });
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Number of listeners registered for `target` and `kind`.
    pub fn listener_count(&self, target: &str, kind: EventKind) -> usize {
        self.subscriptions
            .iter()
            .filter(|s| s.target == target && s.kind == kind)
            .count()
    }

    /// Deliver `event` to every matching listener.
    pub fn dispatch(&mut self, event: &Event) -> Dispatch {
        let mut dispatch = Dispatch::default();
        let kind = event.kind();
        let target = event.target();

        let mut delivered = 0usize;
        for sub in self
            .subscriptions
            .iter_mut()
            .filter(|s| s.kind == kind && s.target == target)
        {
            (sub.listener)(event, &mut dispatch);
            delivered += 1;
        }

        log::trace!(
            "[bus] {:?} on {} delivered to {} listener(s), default_prevented={}",
            kind,
            target,
            delivered,
            dispatch.is_default_prevented()
        );

        dispatch
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}
