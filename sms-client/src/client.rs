//! Main PortalClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::cookie::{self, CookieSource, StaticCookies};
use crate::error::{ApiError, Error};
use crate::query;
use crate::response::{DeleteResponse, ExportFile};

/// Header carrying the CSRF token on state-changing requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Client for the Student Management System server endpoints used by the
/// page: the list export download and the AJAX delete.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks safely.
///
/// # Example
///
/// ```ignore
/// use sms_client::{PortalClient, cookie::StaticCookies};
///
/// let client = PortalClient::builder()
///     .url(Url::parse("http://localhost:8000/")?)
///     .cookies(StaticCookies::new("csrftoken=abc"))
///     .build()?;
///
/// let outcome = client.delete_student(42).await?;
/// ```
#[derive(Clone)]
pub struct PortalClient {
    inner: Arc<PortalClientInner>,
}

struct PortalClientInner {
    base_url: Url,
    cookies: Arc<dyn CookieSource>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl PortalClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> PortalClientBuilder<Missing> {
        PortalClientBuilder::new()
    }

    /// Returns the server's base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// The AJAX delete endpoint for a student.
    pub fn delete_url(&self, student_id: u64) -> Result<Url, Error> {
        Ok(self
            .inner
            .base_url
            .join(&format!("/students/{student_id}/delete-ajax/"))?)
    }

    /// Downloads the export of the list shown at `page`.
    ///
    /// The request is `page` with `export=true`. The body is returned as-is,
    /// whatever content type the server reports.
    pub async fn export(&self, page: &Url) -> Result<ExportFile, Error> {
        let url = query::export_url(page);
        log::debug!("[client] GET {url}");

        let mut request = self.inner.http_client.get(url);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.transport(e))?;
        let status = response.status();
        // An error page is reported, never saved as the export file.
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http(status.as_u16(), body).into());
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(|e| self.transport(e))?;

        Ok(ExportFile {
            content_type,
            bytes: bytes.to_vec(),
        })
    }

    /// Deletes a student through the AJAX endpoint.
    ///
    /// The JSON body is decoded whatever the status code; a business failure
    /// comes back as `Ok` with `success: false`.
    pub async fn delete_student(&self, student_id: u64) -> Result<DeleteResponse, Error> {
        let url = self.delete_url(student_id)?;
        log::debug!("[client] POST {url}");

        let mut request = self
            .inner
            .http_client
            .post(url)
            .header(CONTENT_TYPE, "application/json");

        match cookie::csrf_token(self.inner.cookies.as_ref()) {
            Some(token) => request = request.header(CSRF_HEADER, token),
            None => log::warn!("[client] no {} cookie, sending delete without CSRF token", cookie::CSRF_COOKIE),
        }

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.transport(e))?;
        let body = response.text().await.map_err(|e| self.transport(e))?;

        serde_json::from_str(&body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body).into())
    }

    fn transport(&self, err: reqwest::Error) -> ApiError {
        ApiError::from_reqwest(err, self.inner.timeout)
    }
}

impl std::fmt::Debug for PortalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`PortalClient`].
///
/// Uses the typestate pattern to ensure the base URL is set at compile time.
pub struct PortalClientBuilder<U> {
    url: U,
    cookies: Arc<dyn CookieSource>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl PortalClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            cookies: Arc::new(StaticCookies::default()),
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the server's base URL.
    pub fn url(self, url: Url) -> PortalClientBuilder<Set<Url>> {
        PortalClientBuilder {
            url: Set(url),
            cookies: self.cookies,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for PortalClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> PortalClientBuilder<U> {
    /// Sets where the CSRF cookie is read from.
    ///
    /// Defaults to an empty cookie jar.
    pub fn cookies<C: CookieSource + 'static>(mut self, cookies: C) -> Self {
        self.cookies = Arc::new(cookies);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl PortalClientBuilder<Set<Url>> {
    /// Builds the [`PortalClient`].
    pub fn build(self) -> Result<PortalClient, Error> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(PortalClient {
            inner: Arc::new(PortalClientInner {
                base_url: self.url.0,
                cookies: self.cookies,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
