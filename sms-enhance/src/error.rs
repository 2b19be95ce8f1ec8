//! Error type for the enhancement layer.

use pagedom::DomError;

/// Errors raised while wiring or running page behaviour.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A document lookup or mutation failed.
    #[error(transparent)]
    Dom(#[from] DomError),

    /// No element matched a selector the component depends on.
    #[error("no element matches {0:?}")]
    MissingElement(String),

    /// A request to the server failed.
    #[error(transparent)]
    Client(#[from] sms_client::error::Error),

    /// Saving a download failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An export is already running for this button.
    #[error("export already in progress")]
    ExportInProgress,

    /// A chart colour is not a valid sRGB hex string.
    #[error("invalid colour {0:?}")]
    InvalidColor(String),
}
