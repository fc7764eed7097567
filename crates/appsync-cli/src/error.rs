//! Error types for appsync-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from appsync-core
    #[error(transparent)]
    Core(#[from] appsync_core::Error),

    /// Error from appsync-remote
    #[error(transparent)]
    Remote(#[from] appsync_remote::Error),

    /// Error from appsync-fs
    #[error(transparent)]
    Fs(#[from] appsync_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// The remote HTTP status behind this error, if any.
    fn remote_status(&self) -> Option<u16> {
        match self {
            Self::Core(appsync_core::Error::Remote(e)) | Self::Remote(e) => e.status(),
            _ => None,
        }
    }

    /// Whether the cause is a network-level failure (DNS, connect, TLS).
    fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Core(appsync_core::Error::Remote(
                appsync_remote::Error::Transport(_)
            )) | Self::Remote(appsync_remote::Error::Transport(_))
        )
    }

    /// Message shown to the user, with guidance attached where the failure
    /// category allows it.
    pub fn user_message(&self) -> String {
        if let Some(status) = self.remote_status() {
            let hint = match status {
                401 | 403 => "check credentials",
                404 => "check group, app and baseUrl",
                _ => "check logs for more info",
            };
            return format!("{self} ({hint})");
        }
        if self.is_transport() {
            return format!("{self} (couldn't reach host; check baseUrl)");
        }
        self.to_string()
    }
}
