//! Interactive menu loop.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::domain::MIN_DOMAIN_LEN;
use crate::error::HostsError;
use crate::hosts::{HostsStore, NON_ROUTABLE};

const MENU: &str = "
-------------------System Administrator's Utility-------------------
1 - Block a specific domain name.
2 - Block domain name/s specified in a file.
3 - Display domain name/s currently being blocked.
4 - Remove a specific domain name from hosts file.
5 - Create a backup of the hosts file to the current directory.
6 - Unblock all domains names.
R - Restore from a backup.
Q - To Quit.
";

/// Menu shell over an arbitrary input/output pair.
pub struct Shell<'a, R, W> {
    store: &'a mut HostsStore,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(store: &'a mut HostsStore, input: R, out: W) -> Self {
        Self { store, input, out }
    }

    /// Run until the user quits or input ends. Only fatal store errors and output failures escape.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.out, "{MENU}")?;
            write!(self.out, "Please enter one of the above: ")?;
            self.out.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };
            let choice = line.trim_start().chars().next();
            let keep_going = match choice {
                Some('1') => self.block()?,
                Some('2') => self.block_file()?,
                Some('3') => {
                    self.list()?;
                    true
                }
                Some('4') => self.remove()?,
                Some('5') => {
                    self.backup()?;
                    true
                }
                Some('6') => {
                    self.clear()?;
                    true
                }
                Some('r' | 'R') => self.restore()?,
                Some('q' | 'Q') => false,
                _ => {
                    writeln!(self.out, "\nERROR: Wrong input.")?;
                    true
                }
            };
            if !keep_going {
                return Ok(());
            }
        }
    }

    fn block(&mut self) -> Result<bool> {
        let Some(domain) = self.prompt(
            "Enter a domain name to block (e.g facebook.com): ",
            "\nERROR: The domain name is too small, try again (e.g facebook.com): ",
            |s| s.chars().count() >= MIN_DOMAIN_LEN,
        )?
        else {
            return Ok(false);
        };
        if !self.backup_quietly()? {
            return Ok(true);
        }
        match self.store.block_domain(&domain) {
            Ok(added) => {
                for entry in added {
                    writeln!(self.out, "{NON_ROUTABLE} {entry}")?;
                }
            }
            Err(e) => self.report(e)?,
        }
        Ok(true)
    }

    fn block_file(&mut self) -> Result<bool> {
        let Some(path) = self.prompt(
            "\nPlease enter the path to the file to extract data from: (file.txt): ",
            "\nPlease enter a valid file path or file name: ",
            |s| !s.is_empty(),
        )?
        else {
            return Ok(false);
        };
        if !self.backup_quietly()? {
            return Ok(true);
        }
        match self.store.append_from_file(Path::new(&path)) {
            Ok(summary) => writeln!(
                self.out,
                "\nBlocked {} domain name/s ({} already blocked).",
                summary.blocked, summary.already_blocked
            )?,
            Err(e) => self.report(e)?,
        }
        Ok(true)
    }

    fn list(&mut self) -> Result<()> {
        match self.store.list_domains() {
            Ok(domains) => {
                writeln!(
                    self.out,
                    "\nThe following addresses are being redirected to a non-routable address:"
                )?;
                for domain in domains {
                    writeln!(self.out, "{domain}")?;
                }
                Ok(())
            }
            Err(HostsError::EmptySet) => {
                writeln!(self.out, "\nNo domain names are being blocked.")?;
                Ok(())
            }
            Err(e) => self.report(e),
        }
    }

    fn remove(&mut self) -> Result<bool> {
        let Some(domain) = self.prompt(
            "Enter the domain name to be removed in the form (e.g facebook.com): ",
            "\nERROR: Please enter a domain name, try again (e.g facebook.com): ",
            |s| !s.is_empty(),
        )?
        else {
            return Ok(false);
        };
        if !self.backup_quietly()? {
            return Ok(true);
        }
        match self.store.remove_domain(&domain, false) {
            Ok(true) => writeln!(
                self.out,
                "\nThe domain name {domain} has been removed successfully."
            )?,
            Ok(false) => writeln!(self.out, "\nERROR: Couldn't remove the domain from hosts file.")?,
            Err(e) => self.report(e)?,
        }
        Ok(true)
    }

    fn backup(&mut self) -> Result<()> {
        match self.store.backup() {
            Ok(()) => {
                let path = self.store.backup_path().display().to_string();
                writeln!(self.out, "\nThe backup file can be found at: {path}")?;
                Ok(())
            }
            Err(e) => self.report(e),
        }
    }

    fn clear(&mut self) -> Result<()> {
        if !self.backup_quietly()? {
            return Ok(());
        }
        match self.store.clear_all() {
            Ok(_) => writeln!(self.out, "All domain names have been removed. You are all set!")?,
            Err(HostsError::EmptySet) => writeln!(
                self.out,
                "\nThere are no domains currently being blocked. You are all set!"
            )?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn restore(&mut self) -> Result<bool> {
        let Some(path) = self.prompt(
            "\nEnter the file name or path of the file that's to replace the hosts file (e.g hosts.bak): ",
            "ERROR: Please enter a file name or path, try again (e.g hosts.bak): ",
            |s| !s.is_empty(),
        )?
        else {
            return Ok(false);
        };
        match self.store.overwrite(Path::new(&path)) {
            Ok(()) => writeln!(self.out, "\nThe file has been replaced successfully!")?,
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => writeln!(self.out, "ERROR: Could not replace the hosts file: {e}")?,
        }
        Ok(true)
    }

    /// Back up before a mutation; `false` means the backup failed and was reported.
    fn backup_quietly(&mut self) -> Result<bool> {
        match self.store.backup() {
            Ok(()) => Ok(true),
            Err(e) => {
                self.report(e)?;
                Ok(false)
            }
        }
    }

    fn report(&mut self, err: HostsError) -> Result<()> {
        if err.is_fatal() {
            return Err(err.into());
        }
        if err.is_advisory() {
            writeln!(self.out, "\n{err}")?;
        } else {
            writeln!(self.out, "\nERROR: {err}")?;
        }
        Ok(())
    }

    /// Prompt until `accept` passes. `None` when input ends.
    fn prompt(
        &mut self,
        first: &str,
        retry: &str,
        accept: impl Fn(&str) -> bool,
    ) -> Result<Option<String>> {
        write!(self.out, "{first}")?;
        loop {
            self.out.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            if accept(&line) {
                return Ok(Some(line));
            }
            write!(self.out, "{retry}")?;
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
