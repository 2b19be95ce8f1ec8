//! The server endpoints the page talks to.

use async_trait::async_trait;
use sms_client::error::Error as ClientError;
use sms_client::{DeleteResponse, ExportFile, PortalClient};
use url::Url;

/// Server calls made by the export and delete controllers.
///
/// [`PortalClient`] is the HTTP implementation; controllers only see this
/// trait so they can run against any backend.
#[async_trait]
pub trait Portal: Send + Sync {
    /// Download the export of the list at `page`.
    async fn export(&self, page: &Url) -> Result<ExportFile, ClientError>;

    /// Delete a student through the AJAX endpoint.
    async fn delete_student(&self, student_id: u64) -> Result<DeleteResponse, ClientError>;
}

#[async_trait]
impl Portal for PortalClient {
    async fn export(&self, page: &Url) -> Result<ExportFile, ClientError> {
        PortalClient::export(self, page).await
    }

    async fn delete_student(&self, student_id: u64) -> Result<DeleteResponse, ClientError> {
        PortalClient::delete_student(self, student_id).await
    }
}
