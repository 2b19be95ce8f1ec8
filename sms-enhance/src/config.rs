//! Timing and naming knobs

use std::path::PathBuf;
use std::time::Duration;

/// Default delay between the last search keystroke and navigation.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Default lifetime of a notification banner.
pub const DEFAULT_BANNER_DISMISS: Duration = Duration::from_secs(5);

/// Default delay before reloading after a successful delete.
pub const DEFAULT_RELOAD_DELAY: Duration = Duration::from_millis(1500);

/// Name every export download is saved under.
pub const DEFAULT_EXPORT_FILENAME: &str = "students_export.csv";

/// Configuration for the page enhancement layer.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use sms_enhance::EnhanceConfig;
///
/// let config = EnhanceConfig::default()
///     .with_search_debounce(Duration::from_millis(250))
///     .with_banner_dismiss(Duration::from_secs(8));
/// assert_eq!(config.export_filename, "students_export.csv");
/// ```
#[derive(Debug, Clone)]
pub struct EnhanceConfig {
    /// Quiet period after a search keystroke before navigating.
    ///
    /// Default: 500 ms
    pub search_debounce: Duration,

    /// How long banners (and server-rendered `.alert`s) stay visible.
    ///
    /// Default: 5 seconds
    pub banner_dismiss: Duration,

    /// Delay between a successful delete banner and the page reload.
    ///
    /// Default: 1.5 seconds
    pub reload_delay: Duration,

    /// File name for export downloads, whatever the server's content type.
    ///
    /// Default: `students_export.csv`
    pub export_filename: String,

    /// Directory export downloads are written to.
    ///
    /// Default: the working directory
    pub download_dir: PathBuf,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            banner_dismiss: DEFAULT_BANNER_DISMISS,
            reload_delay: DEFAULT_RELOAD_DELAY,
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            download_dir: PathBuf::from("."),
        }
    }
}

impl EnhanceConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search debounce delay.
    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = delay;
        self
    }

    /// Sets the banner lifetime.
    pub fn with_banner_dismiss(mut self, delay: Duration) -> Self {
        self.banner_dismiss = delay;
        self
    }

    /// Sets the post-delete reload delay.
    pub fn with_reload_delay(mut self, delay: Duration) -> Self {
        self.reload_delay = delay;
        self
    }

    /// Sets the export file name.
    pub fn with_export_filename(mut self, name: impl Into<String>) -> Self {
        self.export_filename = name.into();
        self
    }

    /// Sets the download directory.
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }
}
