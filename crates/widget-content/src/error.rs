//! Error types for widget-content

/// Result type for widget-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in widget-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse {format} content: {message}")]
    ParseError { format: String, message: String },

    #[error(transparent)]
    Fs(#[from] widget_fs::Error),
}

impl Error {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            format: format.into(),
            message: message.into(),
        }
    }
}
