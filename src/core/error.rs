//! Error types for the vitals library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using vitals' Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during report generation.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// External tool failed to launch or produced no usable output.
    #[error("Tool '{tool}' failed: {message}")]
    Tool { tool: String, message: String },

    /// Git operation error.
    #[error("Git error: {0}")]
    Git(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Report-specific error.
    #[error("Report error: {message}")]
    Report { message: String },
}

impl Error {
    /// Create a new report error.
    pub fn report(message: impl Into<String>) -> Self {
        Self::Report {
            message: message.into(),
        }
    }

    /// Create a new git error.
    pub fn git(message: impl Into<String>) -> Self {
        Self::Git(message.into())
    }

    /// Create a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new external-tool error.
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::report("test error");
        assert_eq!(err.to_string(), "Report error: test error");

        let err = Error::FileNotFound {
            path: PathBuf::from("reports/missing.csv"),
        };
        assert_eq!(err.to_string(), "File not found: reports/missing.csv");
    }

    #[test]
    fn test_tool_error() {
        let err = Error::tool("pmd", "exit code 1");
        match err {
            Error::Tool { tool, message } => {
                assert_eq!(tool, "pmd");
                assert_eq!(message, "exit code 1");
            }
            _ => panic!("Expected Tool"),
        }
    }
}
