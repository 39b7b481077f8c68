//! Error types shared across Autocam crates.
//!
//! The planning and composition core never fails; these errors belong to
//! the layers around it (configuration, file loading, CLI plumbing).

use std::path::PathBuf;

/// Top-level error type for Autocam operations.
#[derive(Debug, thiserror::Error)]
pub enum AutocamError {
    #[error("Processing error: {message}")]
    Processing { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using AutocamError.
pub type AutocamResult<T> = Result<T, AutocamError>;

impl AutocamError {
    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AutocamError::processing("bad plan").to_string(),
            "Processing error: bad plan"
        );
        assert_eq!(
            AutocamError::file_not_found("/tmp/missing.json").to_string(),
            "File not found: /tmp/missing.json"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let wrapped: AutocamError = err.into();
        assert!(matches!(wrapped, AutocamError::Json(_)));
    }
}
