//! The page document and its shared handle.

use std::sync::{Arc, PoisonError, RwLock};

use crate::element::{self, Content, Element};
use crate::selector::{Selector, SelectorError};

/// Errors raised by document lookups and mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("no element with id {0:?}")]
    UnknownElement(String),
    #[error("element {0:?} has no parent")]
    Detached(String),
    #[error("invalid selector: {0}")]
    Selector(#[from] SelectorError),
}

/// An element tree rooted at a single element (the `body`).
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        element::find_element(&self.root, id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        element::find_element_mut(&mut self.root, id)
    }

    /// Look up an element, failing with [`DomError::UnknownElement`].
    pub fn element(&self, id: &str) -> Result<&Element, DomError> {
        self.get(id)
            .ok_or_else(|| DomError::UnknownElement(id.to_string()))
    }

    pub fn element_mut(&mut self, id: &str) -> Result<&mut Element, DomError> {
        self.get_mut(id)
            .ok_or_else(|| DomError::UnknownElement(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn parent_id(&self, id: &str) -> Option<String> {
        element::find_parent(&self.root, id).map(|p| p.id.clone())
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// IDs of all elements matching `selector`, in document order.
    pub fn select(&self, selector: &Selector) -> Vec<String> {
        let mut found = Vec::new();
        element::walk(&self.root, &mut |el| {
            if selector.matches(el) {
                found.push(el.id.clone());
            }
        });
        found
    }

    /// IDs of the descendants of `scope` matching `selector`, in document order.
    ///
    /// The scope element itself is never included.
    pub fn select_within(&self, scope: &str, selector: &Selector) -> Result<Vec<String>, DomError> {
        let scope = self.element(scope)?;
        let mut found = Vec::new();
        for child in scope.child_elements() {
            element::walk(child, &mut |el| {
                if selector.matches(el) {
                    found.push(el.id.clone());
                }
            });
        }
        Ok(found)
    }

    /// Parse `selector` and return every match in document order.
    pub fn query_all(&self, selector: &str) -> Result<Vec<String>, DomError> {
        Ok(self.select(&Selector::parse(selector)?))
    }

    /// Parse `selector` and return the first match.
    pub fn query(&self, selector: &str) -> Result<Option<String>, DomError> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> Result<(), DomError> {
        self.element_mut(id)?.value = value.into();
        Ok(())
    }

    pub fn append_child(&mut self, parent: &str, child: Element) -> Result<(), DomError> {
        let parent = self.element_mut(parent)?;
        match &mut parent.content {
            Content::Children(children) => children.push(child),
            content => *content = Content::Children(vec![child]),
        }
        Ok(())
    }

    /// Insert `child` before the first existing child of `parent`.
    pub fn prepend_child(&mut self, parent: &str, child: Element) -> Result<(), DomError> {
        let parent = self.element_mut(parent)?;
        match &mut parent.content {
            Content::Children(children) => children.insert(0, child),
            content => *content = Content::Children(vec![child]),
        }
        Ok(())
    }

    /// Detach an element (and its subtree) from the document.
    pub fn remove(&mut self, id: &str) -> Result<Element, DomError> {
        let parent = self.parent_id(id).ok_or_else(|| {
            if self.contains(id) {
                DomError::Detached(id.to_string())
            } else {
                DomError::UnknownElement(id.to_string())
            }
        })?;

        let parent = self.element_mut(&parent)?;
        let Content::Children(children) = &mut parent.content else {
            return Err(DomError::UnknownElement(id.to_string()));
        };
        let index = children
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| DomError::UnknownElement(id.to_string()))?;
        Ok(children.remove(index))
    }
}

/// Shared, cloneable handle to a [`Document`].
///
/// Event listeners and timer tasks each hold a clone; every access takes the
/// lock for the duration of one closure and never across an `.await`.
#[derive(Debug, Clone)]
pub struct Dom {
    inner: Arc<RwLock<Document>>,
}

impl Dom {
    pub fn new(document: Document) -> Self {
        Self {
            inner: Arc::new(RwLock::new(document)),
        }
    }

    /// Run `f` with shared access to the document.
    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run `f` with exclusive access to the document.
    pub fn write<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Snapshot of one element.
    pub fn element(&self, id: &str) -> Option<Element> {
        self.read(|doc| doc.get(id).cloned())
    }
}

impl From<Document> for Dom {
    fn from(document: Document) -> Self {
        Self::new(document)
    }
}
