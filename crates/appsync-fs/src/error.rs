//! Error types for appsync-fs

use std::path::PathBuf;

/// Result type for appsync-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in appsync-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid ignore rule {rule:?}: {message}")]
    IgnoreRule { rule: String, message: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the underlying cause is a missing file or directory.
    ///
    /// "Absence is normal" branches (missing ignore file, snapshot, sidecar)
    /// key off this instead of matching `std::io::ErrorKind` at every caller.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
