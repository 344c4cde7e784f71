//! Windows platform implementation.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;

use super::{Access, Platform};

pub struct WindowsPlatform;

impl Platform for WindowsPlatform {
    fn hosts_path(&self) -> PathBuf {
        let root = std::env::var_os("SystemRoot").unwrap_or_else(|| r"C:\Windows".into());
        PathBuf::from(root)
            .join("System32")
            .join("drivers")
            .join("etc")
            .join("hosts")
    }

    fn ensure_write_access(&self) -> Result<Access> {
        let path = self.hosts_path();
        OpenOptions::new()
            .append(true)
            .open(&path)
            .with_context(|| {
                format!(
                    "cannot write {}; run hostblock from an Administrator prompt",
                    path.display()
                )
            })?;
        Ok(Access::Granted)
    }
}
