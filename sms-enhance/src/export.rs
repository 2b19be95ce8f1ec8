//! CSV export button.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use pagedom::{Content, Dom};
use sms_client::ExportFile;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::EnhanceConfig;
use crate::error::Error;
use crate::navigate::Navigator;
use crate::notify::{Banners, Severity};
use crate::portal::Portal;

/// Selector of the export button.
pub const EXPORT_BUTTON: &str = ".export-btn";

/// Button content while an export is in flight.
pub const LOADING_MARKUP: &str = r#"<span class="loading"></span> Exporting..."#;

/// Banner shown when the export request or the save fails.
pub const EXPORT_FAILED: &str = "Export failed. Please try again.";

/// Where downloaded files end up.
#[async_trait]
pub trait Downloads: Send + Sync {
    /// Save `file` as `filename`, returning where it was written.
    async fn save(&self, filename: &str, file: &ExportFile) -> std::io::Result<PathBuf>;
}

/// Saves downloads into a directory, creating it if needed.
#[derive(Debug, Clone)]
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Save into the configured download directory.
    pub fn from_config(config: &EnhanceConfig) -> Self {
        Self::new(&config.download_dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl Downloads for DirectoryDownloads {
    async fn save(&self, filename: &str, file: &ExportFile) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(filename);
        tokio::fs::write(&path, &file.bytes).await?;
        Ok(path)
    }
}

/// Drives the export button: loading state, download, failure banner.
#[derive(Clone)]
pub struct ExportController {
    dom: Dom,
    button: String,
    filename: String,
    portal: Arc<dyn Portal>,
    navigator: Arc<dyn Navigator>,
    downloads: Arc<dyn Downloads>,
    banners: Banners,
}

impl ExportController {
    pub fn new(
        dom: Dom,
        button: impl Into<String>,
        portal: Arc<dyn Portal>,
        navigator: Arc<dyn Navigator>,
        downloads: Arc<dyn Downloads>,
        banners: Banners,
    ) -> Self {
        Self {
            dom,
            button: button.into(),
            filename: crate::config::DEFAULT_EXPORT_FILENAME.to_string(),
            portal,
            navigator,
            downloads,
            banners,
        }
    }

    /// Save downloads under `filename` instead of the default.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn button(&self) -> &str {
        &self.button
    }

    /// Start an export in the background on the current tokio runtime.
    ///
    /// Returns `None`, leaving the button untouched, when there is no runtime.
    pub fn trigger(&self) -> Option<JoinHandle<Result<PathBuf, Error>>> {
        let this = self.clone();
        match Handle::try_current() {
            Ok(handle) => Some(handle.spawn(async move { this.run().await })),
            Err(_) => {
                log::warn!("[export] no tokio runtime; export not started");
                None
            }
        }
    }

    /// Run one export to completion.
    ///
    /// The button shows a spinner and is disabled while the request is in
    /// flight; its original content comes back and it is re-enabled however
    /// the export ends. Failures are reported with a danger banner.
    ///
    /// A disabled button means an export is already running; the call
    /// returns [`Error::ExportInProgress`] without sending a request.
    pub async fn run(&self) -> Result<PathBuf, Error> {
        let Some(original) = self.begin()? else {
            log::debug!("[export] {} busy, click ignored", self.button);
            return Err(Error::ExportInProgress);
        };

        let result = self.download().await;
        if let Err(e) = &result {
            log::error!("Export failed: {e}");
            if let Err(banner_err) = self.banners.show(EXPORT_FAILED, Severity::Danger) {
                log::warn!("[export] could not show banner: {banner_err}");
            }
        }

        self.finish(original);
        result
    }

    async fn download(&self) -> Result<PathBuf, Error> {
        let page = self.navigator.location();
        let file = self.portal.export(&page).await?;
        let path = self.downloads.save(&self.filename, &file).await?;
        log::debug!("[export] {} bytes saved to {}", file.bytes.len(), path.display());
        Ok(path)
    }

    fn begin(&self) -> Result<Option<Content>, Error> {
        self.dom.write(|doc| {
            let btn = doc.element_mut(&self.button)?;
            if btn.disabled {
                return Ok(None);
            }
            let original = std::mem::replace(&mut btn.content, Content::Markup(LOADING_MARKUP.to_string()));
            btn.disabled = true;
            Ok::<_, Error>(Some(original))
        })
    }

    fn finish(&self, original: Content) {
        self.dom.write(|doc| match doc.get_mut(&self.button) {
            Some(btn) => {
                btn.content = original;
                btn.disabled = false;
            }
            None => log::warn!("[export] button {} disappeared", self.button),
        });
    }
}

impl std::fmt::Debug for ExportController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportController")
            .field("button", &self.button)
            .field("filename", &self.filename)
            .finish()
    }
}
