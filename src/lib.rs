//! Hostblock - block domain names through the system hosts file.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod hosts;
pub mod logging;
pub mod platform;
pub mod shell;

pub use error::HostsError;
pub use hosts::HostsStore;
