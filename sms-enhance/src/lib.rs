//! Client-side enhancements for the Student Management System pages.
//!
//! The page is a [`pagedom::Dom`]; [`Enhancer::attach`] binds form
//! validation, search, sorting, export and charts to it, the way the page
//! script does on `DOMContentLoaded`.

pub mod charts;
pub mod config;
pub mod delete;
pub mod error;
pub mod export;
pub mod format;
pub mod hints;
pub mod navigate;
pub mod notify;
pub mod page;
pub mod portal;
pub mod search;
pub mod sort;
pub mod validation;

pub use config::EnhanceConfig;
pub use error::Error;
pub use page::{Enhancer, Services};

pub mod prelude {
    pub use crate::charts::ChartConfig;
    pub use crate::config::EnhanceConfig;
    pub use crate::delete::{Confirm, DeleteController, DeleteOutcome};
    pub use crate::error::Error;
    pub use crate::export::{DirectoryDownloads, Downloads, ExportController};
    pub use crate::format::{format_date, format_phone};
    pub use crate::navigate::{MemoryNavigator, Navigator};
    pub use crate::notify::{Banners, Severity};
    pub use crate::page::{Enhancer, Services};
    pub use crate::portal::Portal;
    pub use crate::search::SearchController;
    pub use crate::sort::SortHeaders;
    pub use crate::validation::{SubmissionGuard, ValidationResult, Verdict, validate_field, validate_form};

    pub use pagedom::{Dispatch, Document, Dom, Element, Event};
}
