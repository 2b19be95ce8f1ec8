//! Sortable list headers.

use std::sync::Arc;

use pagedom::Dom;
use sms_client::query::{self, SortOrder};

use crate::error::Error;
use crate::navigate::Navigator;

/// Selector of sortable column headers.
pub const SORT_HEADERS: &str = "th[data-sort]";

/// Header attribute naming the sort field.
pub const SORT_ATTR: &str = "data-sort";

/// Header attribute holding the header's current order.
pub const ORDER_ATTR: &str = "data-order";

/// The order a click on a header moves to: unsorted and descending go
/// ascending, ascending goes descending.
pub fn next_order(current: Option<&str>) -> SortOrder {
    current
        .and_then(|order| order.parse::<SortOrder>().ok())
        .map_or(SortOrder::Asc, SortOrder::toggled)
}

/// Click handling for a table's sortable headers.
#[derive(Clone)]
pub struct SortHeaders {
    dom: Dom,
    headers: Vec<String>,
    navigator: Arc<dyn Navigator>,
}

impl SortHeaders {
    pub fn new(dom: Dom, headers: Vec<String>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            dom,
            headers,
            navigator,
        }
    }

    /// Collect every `th[data-sort]` in the document.
    pub fn discover(dom: Dom, navigator: Arc<dyn Navigator>) -> Result<Self, Error> {
        let headers = dom.read(|doc| doc.query_all(SORT_HEADERS))?;
        Ok(Self::new(dom, headers, navigator))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Handle a click on `header`: update every header's indicators, then
    /// navigate to the list sorted by the header's field.
    pub fn on_click(&self, header: &str) -> Result<(String, SortOrder), Error> {
        let (field, order) = self.dom.write(|doc| {
            let el = doc.element(header)?;
            let field = el
                .get_attr(SORT_ATTR)
                .ok_or_else(|| Error::MissingElement(format!("#{header}[{SORT_ATTR}]")))?
                .to_string();
            let order = next_order(el.get_attr(ORDER_ATTR));

            for id in &self.headers {
                if let Some(h) = doc.get_mut(id) {
                    h.set_attr(ORDER_ATTR, "");
                    h.remove_class("sort-asc");
                    h.remove_class("sort-desc");
                }
            }

            let el = doc.element_mut(header)?;
            el.set_attr(ORDER_ATTR, order.as_str());
            el.add_class(&format!("sort-{order}"));
            Ok::<_, Error>((field, order))
        })?;

        let url = query::sort_url(&self.navigator.location(), &field, order);
        log::debug!("[sort] {field} {order} -> {url}");
        self.navigator.assign(url);
        Ok((field, order))
    }
}

impl std::fmt::Debug for SortHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortHeaders")
            .field("headers", &self.headers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_order() {
        assert_eq!(next_order(None), SortOrder::Asc);
        assert_eq!(next_order(Some("")), SortOrder::Asc);
        assert_eq!(next_order(Some("asc")), SortOrder::Desc);
        assert_eq!(next_order(Some("desc")), SortOrder::Asc);
        assert_eq!(next_order(Some("bogus")), SortOrder::Asc);
    }
}
