//! Unix (macOS, Linux) platform implementation.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Command;

use super::{Access, Platform};

const HOSTS_PATH: &str = "/etc/hosts";

pub struct UnixPlatform;

impl UnixPlatform {
    fn is_root() -> bool {
        // SAFETY: geteuid has no preconditions and cannot fail.
        unsafe { libc::geteuid() == 0 }
    }
}

impl Platform for UnixPlatform {
    fn hosts_path(&self) -> PathBuf {
        PathBuf::from(HOSTS_PATH)
    }

    fn ensure_write_access(&self) -> Result<Access> {
        if Self::is_root() {
            println!("Success, the program has root access!");
            return Ok(Access::Granted);
        }
        let exe = std::env::current_exe().context("locate current executable")?;
        tracing::debug!(exe = %exe.display(), "re-launching under sudo");
        let status = Command::new("sudo")
            .arg(&exe)
            .args(std::env::args_os().skip(1))
            .status()
            .context("run sudo")?;
        Ok(Access::Relaunched(status))
    }
}
