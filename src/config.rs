//! Path configuration.
//!
//! Supports HOSTBLOCK_HOSTS_FILE and HOSTBLOCK_BACKUP_DIR env var overrides for testing.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Fixed name of the backup copy.
pub const BACKUP_FILE_NAME: &str = "hosts.bak";

pub const HOSTS_FILE_ENV: &str = "HOSTBLOCK_HOSTS_FILE";
pub const BACKUP_DIR_ENV: &str = "HOSTBLOCK_BACKUP_DIR";

/// Files the tool reads and writes.
#[derive(Debug, Clone)]
pub struct HostblockPaths {
    pub hosts_file: PathBuf,
    pub backup_dir: PathBuf,
    pub backup_file: PathBuf,
}

impl HostblockPaths {
    pub fn new(hosts_file: impl Into<PathBuf>, backup_dir: impl Into<PathBuf>) -> Self {
        let backup_dir = backup_dir.into();
        let backup_file = backup_dir.join(BACKUP_FILE_NAME);
        Self {
            hosts_file: hosts_file.into(),
            backup_dir,
            backup_file,
        }
    }

    /// Paths for testing: hosts file and backup both live in `base`.
    pub fn for_test(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self::new(base.join("hosts"), base)
    }

    /// Resolve paths from explicit overrides, falling back to the platform hosts file and cwd.
    pub fn resolve(
        hosts_override: Option<PathBuf>,
        backup_dir_override: Option<PathBuf>,
        platform_hosts: impl FnOnce() -> PathBuf,
    ) -> Result<Self> {
        let hosts_file = hosts_override.unwrap_or_else(platform_hosts);
        let backup_dir = match backup_dir_override {
            Some(dir) => dir,
            None => std::env::current_dir().context("determine current directory")?,
        };
        Ok(Self::new(hosts_file, backup_dir))
    }
}
