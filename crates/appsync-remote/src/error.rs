//! Error types for appsync-remote

use std::path::PathBuf;

/// Result type for appsync-remote operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the remote store
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The remote answered with a non-success HTTP status
    #[error("Remote returned status {status}")]
    Status { status: u16 },

    /// Network-level failure (DNS, connect, TLS, body read)
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Sync configuration file not found at the expected path
    #[error("Sync configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Sync configuration file exists but could not be parsed
    #[error("Failed to parse sync configuration at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Filesystem error from appsync-fs
    #[error(transparent)]
    Fs(#[from] appsync_fs::Error),
}

impl Error {
    /// Whether this error is a remote 404.
    ///
    /// Deleting an already-absent object is a successful no-op, so callers
    /// need to tell "not found" apart from every other failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404 })
    }

    /// HTTP status code, if the remote answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
