//! CLI definitions and command routing.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{HostblockPaths, BACKUP_DIR_ENV, HOSTS_FILE_ENV};
use crate::domain;
use crate::error::HostsError;
use crate::hosts::{HostsStore, NON_ROUTABLE};
use crate::platform::{self, Access};
use crate::shell::Shell;

#[derive(Parser)]
#[command(name = "hostblock")]
#[command(about = "Block domain names by redirecting them to 0.0.0.0 in the hosts file")]
pub struct Cli {
    /// Hosts file to edit instead of the system one (skips privilege elevation)
    #[arg(long, global = true, env = HOSTS_FILE_ENV)]
    pub hosts_file: Option<PathBuf>,

    /// Directory for hosts.bak (defaults to the current directory)
    #[arg(long, global = true, env = BACKUP_DIR_ENV)]
    pub backup_dir: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive menu (default when no command is given)
    Shell,

    /// Block one or more domains and their www. variants
    Block {
        #[arg(required = true)]
        domains: Vec<String>,
        /// Do not write hosts.bak first
        #[arg(long)]
        no_backup: bool,
    },

    /// Block every domain listed in a file, one per line
    BlockFile {
        path: PathBuf,
        /// Do not write hosts.bak first
        #[arg(long)]
        no_backup: bool,
    },

    /// List blocked domains
    List,

    /// Unblock a domain and its www. variant
    Unblock {
        domain: String,
        /// Do not write hosts.bak first
        #[arg(long)]
        no_backup: bool,
    },

    /// Copy the hosts file to hosts.bak
    Backup,

    /// Unblock every domain
    Clear {
        /// Do not write hosts.bak first
        #[arg(long)]
        no_backup: bool,
    },

    /// Replace the hosts file with the given file (e.g. hosts.bak)
    Restore { path: PathBuf },
}

/// Run CLI and dispatch to handlers.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose, cli.quiet);

    let command = cli.command.unwrap_or(Commands::Shell);
    let platform = platform::default_platform();

    if cli.hosts_file.is_none() && !matches!(command, Commands::List) {
        if let Access::Relaunched(status) = platform.ensure_write_access()? {
            std::process::exit(status.code().unwrap_or(1));
        }
    }

    let paths = HostblockPaths::resolve(cli.hosts_file, cli.backup_dir, || platform.hosts_path())?;
    tracing::debug!(hosts = %paths.hosts_file.display(), backup = %paths.backup_file.display(), "resolved paths");
    let mut store = HostsStore::open(&paths)
        .with_context(|| format!("cannot load {}", paths.hosts_file.display()))?;

    match command {
        Commands::Shell => {
            let stdin = std::io::stdin();
            Shell::new(&mut store, stdin.lock(), std::io::stdout()).run()
        }
        Commands::Block { domains, no_backup } => cmd_block(&mut store, &domains, no_backup),
        Commands::BlockFile { path, no_backup } => {
            backup_unless(&store, no_backup)?;
            let summary = store.append_from_file(&path)?;
            println!(
                "Blocked {} domain name/s ({} already blocked).",
                summary.blocked, summary.already_blocked
            );
            Ok(())
        }
        Commands::List => {
            match store.list_domains() {
                Ok(domains) => domains.for_each(|d| println!("{d}")),
                Err(HostsError::EmptySet) => println!("No domain names are being blocked."),
                Err(e) => return Err(e.into()),
            }
            Ok(())
        }
        Commands::Unblock { domain, no_backup } => {
            backup_unless(&store, no_backup)?;
            if store.remove_domain(&domain, false)? {
                println!("Removed: {}", crate::domain::normalize(&domain));
                Ok(())
            } else {
                anyhow::bail!("couldn't remove the domain from hosts file: nothing is blocked")
            }
        }
        Commands::Backup => {
            store.backup()?;
            println!("{}", store.backup_path().display());
            Ok(())
        }
        Commands::Clear { no_backup } => {
            backup_unless(&store, no_backup)?;
            match store.clear_all() {
                Ok(count) => println!("Removed {count} entries."),
                Err(HostsError::EmptySet) => {
                    println!("There are no domains currently being blocked.")
                }
                Err(e) => return Err(e.into()),
            }
            Ok(())
        }
        Commands::Restore { path } => {
            store.overwrite(&path)?;
            println!("Restored hosts file from {}", path.display());
            Ok(())
        }
    }
}

fn cmd_block(store: &mut HostsStore, domains: &[String], no_backup: bool) -> Result<()> {
    for raw in domains {
        domain::validate_input(raw).with_context(|| format!("rejected {raw:?}"))?;
    }
    backup_unless(store, no_backup)?;
    for raw in domains {
        match store.block_domain(raw) {
            Ok(added) => added.iter().for_each(|d| println!("{NON_ROUTABLE} {d}")),
            Err(e) if e.is_advisory() => println!("{e}"),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn backup_unless(store: &HostsStore, skip: bool) -> Result<()> {
    if !skip {
        store.backup().context("backup before change")?;
    }
    Ok(())
}
