//! Error types for widget-core

use std::path::PathBuf;

/// Result type for widget-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in widget-core operations
///
/// Only configuration problems are errors. Missing or invalid assets are
/// logged and reported as warnings in a [`crate::SyncReport`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The host app config has no Android package name
    #[error("Android package name is not configured (set `android.package` in the app config)")]
    MissingPackage,

    /// Options failed validation
    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },

    /// Host manifest expected on disk is absent
    #[error("Host manifest not found at {path}")]
    ManifestNotFound { path: PathBuf },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from widget-fs
    #[error(transparent)]
    Fs(#[from] widget_fs::Error),

    /// Content error from widget-content
    #[error(transparent)]
    Content(#[from] widget_content::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }
}
