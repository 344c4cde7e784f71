//! Platform abstraction for hosts file location and write privileges.

use std::path::PathBuf;
use std::process::ExitStatus;

#[cfg(unix)]
pub mod unix;

#[cfg(windows)]
pub mod windows;

use anyhow::Result;

/// Outcome of making sure the process may write the hosts file.
#[derive(Debug)]
pub enum Access {
    /// This process can proceed.
    Granted,
    /// The tool was re-launched with elevated rights and has finished; exit with its status.
    Relaunched(ExitStatus),
}

/// Trait for OS-specific path discovery and privilege elevation.
pub trait Platform {
    /// Absolute path of the system hosts file.
    fn hosts_path(&self) -> PathBuf;
    /// Ensure the hosts file is writable, elevating if the platform supports it.
    fn ensure_write_access(&self) -> Result<Access>;
}

/// Get platform implementation.
pub fn default_platform() -> Box<dyn Platform> {
    #[cfg(unix)]
    return Box::new(unix::UnixPlatform);

    #[cfg(windows)]
    return Box::new(windows::WindowsPlatform);
}
