//! Error types

mod api;

pub use api::*;

/// Top-level error for portal requests.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request failed or returned an unusable response.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A URL could not be built from the configured base URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Returns the HTTP status code if the server answered with an error status.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(e) => e.status_code(),
            Self::Url(_) => None,
        }
    }
}
