//! List-page query string handling.
//!
//! The student list is driven entirely by its query string: `search`,
//! `sort`, `order`, `page` and `export`. Setting a parameter follows
//! `URLSearchParams.set` semantics: the first occurrence is replaced in
//! place, later duplicates are dropped, and a missing key is appended.

use std::fmt;
use std::str::FromStr;

use url::Url;

pub const SEARCH: &str = "search";
pub const SORT: &str = "sort";
pub const ORDER: &str = "order";
pub const PAGE: &str = "page";
pub const EXPORT: &str = "export";

/// Sort direction for a list column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown sort order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order {0:?}")]
pub struct UnknownSortOrder(pub String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(UnknownSortOrder(other.to_string())),
        }
    }
}

fn pairs(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn write_pairs(url: &mut Url, pairs: &[(String, String)]) {
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

/// Returns the first value of `key`, if present.
pub fn get_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Sets `key` to `value`.
pub fn set_param(url: &mut Url, key: &str, value: &str) {
    let mut replaced = false;
    let mut updated = Vec::new();

    for (k, v) in pairs(url) {
        if k != key {
            updated.push((k, v));
        } else if !replaced {
            updated.push((k, value.to_string()));
            replaced = true;
        }
    }

    if !replaced {
        updated.push((key.to_string(), value.to_string()));
    }

    write_pairs(url, &updated);
}

/// Removes every occurrence of `key`.
pub fn remove_param(url: &mut Url, key: &str) {
    let current = pairs(url);
    if current.iter().all(|(k, _)| k != key) {
        return;
    }
    let updated: Vec<_> = current.into_iter().filter(|(k, _)| k != key).collect();
    write_pairs(url, &updated);
}

/// The list URL for a new search: `search` set, back to the first page.
pub fn search_url(current: &Url, query: &str) -> Url {
    let mut url = current.clone();
    set_param(&mut url, SEARCH, query);
    remove_param(&mut url, PAGE);
    url
}

/// The list URL sorted by `field`, back to the first page.
pub fn sort_url(current: &Url, field: &str, order: SortOrder) -> Url {
    let mut url = current.clone();
    set_param(&mut url, SORT, field);
    set_param(&mut url, ORDER, order.as_str());
    remove_param(&mut url, PAGE);
    url
}

/// The current list URL with a file download requested.
pub fn export_url(current: &Url) -> Url {
    let mut url = current.clone();
    set_param(&mut url, EXPORT, "true");
    url
}

/// Typed view of the list-page query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
    pub page: Option<u32>,
    pub export: bool,
}

impl ListQuery {
    /// Reads the list parameters from `url`. Malformed `order`/`page`
    /// values are treated as absent.
    pub fn from_url(url: &Url) -> Self {
        Self {
            search: get_param(url, SEARCH),
            sort: get_param(url, SORT),
            order: get_param(url, ORDER).and_then(|o| o.parse().ok()),
            page: get_param(url, PAGE).and_then(|p| p.parse().ok()),
            export: get_param(url, EXPORT).as_deref() == Some("true"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_set_param_replaces_in_place() {
        let mut u = url("http://localhost/students/list/?sort=name&search=old&order=asc");
        set_param(&mut u, "search", "new");
        assert_eq!(u.query(), Some("sort=name&search=new&order=asc"));
    }

    #[test]
    fn test_set_param_drops_duplicates() {
        let mut u = url("http://localhost/?search=a&page=2&search=b");
        set_param(&mut u, "search", "c");
        assert_eq!(u.query(), Some("search=c&page=2"));
    }

    #[test]
    fn test_set_param_appends_missing_key() {
        let mut u = url("http://localhost/list/");
        set_param(&mut u, "export", "true");
        assert_eq!(u.as_str(), "http://localhost/list/?export=true");
    }

    #[test]
    fn test_remove_last_param_clears_query() {
        let mut u = url("http://localhost/list/?page=3");
        remove_param(&mut u, "page");
        assert_eq!(u.as_str(), "http://localhost/list/");
    }

    #[test]
    fn test_search_url_encodes_and_resets_page() {
        let u = search_url(&url("http://localhost/list/?page=4&department=CS"), "Ada Lovelace");
        assert_eq!(u.query(), Some("department=CS&search=Ada+Lovelace"));
    }

    #[test]
    fn test_sort_url() {
        let u = sort_url(&url("http://localhost/list/?search=x&page=2"), "cgpa", SortOrder::Desc);
        assert_eq!(u.query(), Some("search=x&sort=cgpa&order=desc"));
    }

    #[test]
    fn test_list_query_from_url() {
        let q = ListQuery::from_url(&url(
            "http://localhost/list/?search=ann&sort=name&order=desc&page=2&export=true",
        ));
        assert_eq!(q.search.as_deref(), Some("ann"));
        assert_eq!(q.sort.as_deref(), Some("name"));
        assert_eq!(q.order, Some(SortOrder::Desc));
        assert_eq!(q.page, Some(2));
        assert!(q.export);
    }

    #[test]
    fn test_list_query_ignores_malformed_values() {
        let q = ListQuery::from_url(&url("http://localhost/list/?order=sideways&page=last"));
        assert_eq!(q.order, None);
        assert_eq!(q.page, None);
        assert!(!q.export);
    }
}
