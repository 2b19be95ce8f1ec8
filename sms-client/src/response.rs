//! Response payloads

use serde::Deserialize;

/// Body of the AJAX delete endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteResponse {
    /// Whether the student was deleted.
    pub success: bool,
    /// Human-readable outcome, shown to the user as-is.
    #[serde(default)]
    pub message: String,
}

/// A downloaded export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Content type reported by the server, if any. Not used for naming.
    pub content_type: Option<String>,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}
