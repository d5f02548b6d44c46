//! Error types for widget-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from widget-core
    #[error(transparent)]
    Core(#[from] widget_core::Error),

    /// Error from widget-content
    #[error(transparent)]
    Content(#[from] widget_content::Error),

    /// Error from widget-fs
    #[error(transparent)]
    Fs(#[from] widget_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Host config JSON error
    #[error("Invalid host config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
