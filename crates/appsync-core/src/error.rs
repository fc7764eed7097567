//! Error types for appsync-core

use std::path::PathBuf;

/// Result type for appsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in appsync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed archive content (bad manifest, undecodable payload)
    #[error("Archive error: {message}")]
    Archive { message: String },

    /// An archive entry has no matching manifest record
    #[error("No manifest record for archive entry {name:?}")]
    ManifestEntryMissing { name: String },

    /// A metadata sidecar did not hold a JSON object
    #[error("Sidecar {path} is not a JSON object")]
    SidecarFormat { path: PathBuf },

    /// Remote store error from appsync-remote
    #[error(transparent)]
    Remote(#[from] appsync_remote::Error),

    /// Filesystem error from appsync-fs
    #[error(transparent)]
    Fs(#[from] appsync_fs::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Archive container error
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

impl Error {
    pub fn archive(message: impl Into<String>) -> Self {
        Self::Archive {
            message: message.into(),
        }
    }
}
