//! Error taxonomy for hosts file operations.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostsError {
    /// A file could not be opened, read or written.
    #[error("cannot access '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Both the bare and `www.` forms are already redirected.
    #[error("{0} is already being blocked")]
    AlreadyBlocked(String),

    #[error("no domain names are being blocked")]
    EmptySet,

    /// Input normalized to nothing.
    #[error("invalid domain name: {0:?}")]
    InvalidDomain(String),

    /// The hosts file was replaced but could not be parsed back.
    #[error("hosts file '{}' was replaced but could not be reloaded: {}", .path.display(), .source)]
    Reload {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl HostsError {
    /// Errors after which the in-memory view can no longer be trusted.
    pub fn is_fatal(&self) -> bool {
        matches!(self, HostsError::Reload { .. })
    }

    /// Informational conditions, reported but never treated as failures.
    pub fn is_advisory(&self) -> bool {
        matches!(self, HostsError::AlreadyBlocked(_) | HostsError::EmptySet)
    }
}

pub type Result<T> = std::result::Result<T, HostsError>;

/// Attach the offending path to an `io::Error`.
pub(crate) trait IoContext<T> {
    fn at(self, path: &Path) -> Result<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn at(self, path: &Path) -> Result<T> {
        self.map_err(|source| HostsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
