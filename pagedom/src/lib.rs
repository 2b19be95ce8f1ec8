pub mod bus;
pub mod document;
pub mod element;
pub mod event;
pub mod selector;

pub use bus::{Dispatch, EventBus, Listener, ListenerId};
pub use document::{Document, Dom, DomError};
pub use element::{Content, Element};
pub use event::{Event, EventKind};
pub use selector::{Selector, SelectorError};
