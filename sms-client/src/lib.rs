//! Student Management System HTTP client
//!
//! Request plumbing used by the page enhancement layer: the list-page query
//! string, CSRF cookie lookup, export downloads and AJAX deletes.

pub mod cookie;
pub mod error;
pub mod query;
pub mod response;

mod client;

pub use client::*;
pub use response::{DeleteResponse, ExportFile};
