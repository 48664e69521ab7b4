use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for verstamp operations
#[derive(Error, Debug)]
pub enum VerstampError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Version control error: {0}")]
    Vcs(String),

    #[error("Tag format error: {0}")]
    Format(String),

    #[error("Commit id parse error: {0}")]
    Parse(String),

    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in verstamp
pub type Result<T> = std::result::Result<T, VerstampError>;

impl VerstampError {
    /// Create a version control error with context
    pub fn vcs(msg: impl Into<String>) -> Self {
        VerstampError::Vcs(msg.into())
    }

    /// Create a tag format error with context
    pub fn format(msg: impl Into<String>) -> Self {
        VerstampError::Format(msg.into())
    }

    /// Create a commit id parse error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        VerstampError::Parse(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VerstampError::Config(msg.into())
    }
}
