//! Hosts record store: the set of blocked domains and the hosts file it mirrors.
//!
//! A blocked domain is a line `0.0.0.0 <domain>`. Every other line is carried through
//! rewrites untouched.

use std::collections::{btree_set, BTreeSet};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::HostblockPaths;
use crate::domain::{normalize, www_variant};
use crate::error::{HostsError, IoContext, Result};

/// Redirect target for blocked domains.
pub const NON_ROUTABLE: &str = "0.0.0.0";

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

/// Counts reported by [`HostsStore::append_from_file`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppendSummary {
    pub blocked: usize,
    pub already_blocked: usize,
}

/// In-memory mirror of the blocking lines in a hosts file.
#[derive(Debug)]
pub struct HostsStore {
    blocked: BTreeSet<String>,
    hosts_path: PathBuf,
    backup_path: PathBuf,
}

impl HostsStore {
    /// Load the blocked set from the hosts file. Failure here leaves no consistent view to work with.
    pub fn open(paths: &HostblockPaths) -> Result<Self> {
        let blocked = read_blocked(&paths.hosts_file)?;
        debug!(path = %paths.hosts_file.display(), count = blocked.len(), "loaded hosts file");
        Ok(Self {
            blocked,
            hosts_path: paths.hosts_file.clone(),
            backup_path: paths.backup_file.clone(),
        })
    }

    pub fn hosts_path(&self) -> &Path {
        &self.hosts_path
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    /// Whether the exact entry is tracked (no normalization).
    pub fn contains(&self, entry: &str) -> bool {
        self.blocked.contains(entry)
    }

    /// Redirect `name` and its `www.` variant. Returns the entries that were appended,
    /// bare domain first.
    pub fn block_domain(&mut self, name: &str) -> Result<Vec<String>> {
        let domain = normalize(name);
        if domain.is_empty() {
            return Err(HostsError::InvalidDomain(name.to_string()));
        }
        let missing: Vec<String> = [domain.clone(), www_variant(&domain)]
            .into_iter()
            .filter(|d| !self.blocked.contains(d))
            .collect();
        if missing.is_empty() {
            warn!(domain = %domain, "already blocked");
            return Err(HostsError::AlreadyBlocked(domain));
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.hosts_path)
            .at(&self.hosts_path)?;
        if !ends_with_newline(&mut file).at(&self.hosts_path)? {
            file.write_all(LINE_ENDING.as_bytes()).at(&self.hosts_path)?;
        }
        for entry in &missing {
            file.write_all(blocking_line(entry).as_bytes())
                .at(&self.hosts_path)?;
            self.blocked.insert(entry.clone());
            info!(domain = %entry, "blocked");
        }
        Ok(missing)
    }

    /// Block every non-blank line of `path`. Entries already blocked are counted, not fatal;
    /// an I/O failure stops the run but keeps whatever was appended before it.
    pub fn append_from_file(&mut self, path: &Path) -> Result<AppendSummary> {
        let mut reader = BufReader::new(File::open(path).at(path)?);
        let mut summary = AppendSummary::default();
        let mut raw = Vec::new();
        while next_line(&mut reader, &mut raw).at(path)? {
            let line = String::from_utf8_lossy(&raw);
            if normalize(&line).is_empty() {
                continue;
            }
            match self.block_domain(&line) {
                Ok(_) => summary.blocked += 1,
                Err(HostsError::AlreadyBlocked(_)) => summary.already_blocked += 1,
                Err(e) => return Err(e),
            }
        }
        Ok(summary)
    }

    /// Drop the lines for `name` and `www.name` from the hosts file.
    ///
    /// Non-blocking lines go only when the domain is their sole host name; lines with aliases stay.
    /// Returns `false` when nothing was tracked before the call, even though the file is
    /// still rewritten. With `batch` set the tracked set is left for the caller to update.
    pub fn remove_domain(&mut self, name: &str, batch: bool) -> Result<bool> {
        let domain = normalize(name);
        if domain.is_empty() {
            return Err(HostsError::InvalidDomain(name.to_string()));
        }
        let www = www_variant(&domain);
        let was_tracked = !self.blocked.is_empty();

        self.rewrite_without(&[domain.as_str(), www.as_str()])?;

        if was_tracked && !batch {
            self.blocked.remove(&domain);
            self.blocked.remove(&www);
        }
        info!(domain = %domain, "removed");
        Ok(was_tracked)
    }

    /// Replace the hosts file with a copy lacking every blocking line for `hosts`, and every
    /// other line whose sole host name is in `hosts`.
    ///
    /// The original file is deleted before the copy is renamed into place; a crash
    /// between the two leaves only `<hosts>.tmp` behind.
    fn rewrite_without(&self, hosts: &[&str]) -> Result<()> {
        let tmp_path = temp_path(&self.hosts_path);
        if let Err(e) = self.write_without(&tmp_path, hosts) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
        if let Err(e) = fs::remove_file(&self.hosts_path).at(&self.hosts_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
        // The original is gone at this point; keep the temp copy if the rename fails.
        fs::rename(&tmp_path, &self.hosts_path).at(&self.hosts_path)
    }

    fn write_without(&self, tmp_path: &Path, hosts: &[&str]) -> Result<()> {
        let mut reader = BufReader::new(File::open(&self.hosts_path).at(&self.hosts_path)?);
        let mut out = BufWriter::new(File::create(tmp_path).at(tmp_path)?);
        let mut raw = Vec::new();
        while next_line(&mut reader, &mut raw).at(&self.hosts_path)? {
            let line = String::from_utf8_lossy(&raw);
            let drop = blocked_entry(&line)
                .or_else(|| sole_host(&line))
                .is_some_and(|host| hosts.iter().any(|target| same_host(host, target)));
            if !drop {
                out.write_all(&raw).at(tmp_path)?;
            }
        }
        out.flush().at(tmp_path)
    }

    /// Tracked entries in sorted order. Fails with [`HostsError::EmptySet`] when nothing is tracked.
    pub fn list_domains(&self) -> Result<Domains<'_>> {
        if self.blocked.is_empty() {
            return Err(HostsError::EmptySet);
        }
        Ok(Domains {
            inner: self.blocked.iter(),
        })
    }

    /// Byte-for-byte copy of the hosts file to the backup path, replacing any earlier backup.
    pub fn backup(&self) -> Result<()> {
        copy_file(&self.hosts_path, &self.backup_path)?;
        debug!(path = %self.backup_path.display(), "hosts file backed up");
        Ok(())
    }

    /// Unblock every tracked entry, exactly as written in the hosts file. Returns how many
    /// entries were tracked.
    ///
    /// An I/O error aborts the run and leaves the hosts file as it was.
    pub fn clear_all(&mut self) -> Result<usize> {
        if self.blocked.is_empty() {
            return Err(HostsError::EmptySet);
        }
        let count = self.blocked.len();
        let tracked: Vec<&str> = self.blocked.iter().map(String::as_str).collect();
        self.rewrite_without(&tracked)?;
        self.blocked.clear();
        info!(count, "cleared all blocked domains");
        Ok(count)
    }

    /// Replace the hosts file with the contents of `path` and reload the tracked set.
    ///
    /// A failed reload returns [`HostsError::Reload`], which callers must treat as fatal.
    pub fn overwrite(&mut self, path: &Path) -> Result<()> {
        if is_same_file(path, &self.hosts_path) {
            debug!("replacement is the hosts file itself; reloading only");
        } else {
            copy_file(path, &self.hosts_path)?;
        }

        self.blocked.clear();
        self.blocked = read_blocked(&self.hosts_path).map_err(|e| match e {
            HostsError::Io { path, source } => HostsError::Reload { path, source },
            other => other,
        })?;
        debug!(count = self.blocked.len(), "reloaded hosts file");
        Ok(())
    }
}

/// Sorted, restartable view over the tracked entries.
#[derive(Debug, Clone)]
pub struct Domains<'a> {
    inner: btree_set::Iter<'a, String>,
}

impl<'a> Iterator for Domains<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Domains<'_> {}

/// Format a blocking line for `domain`, newline included.
pub fn blocking_line(domain: &str) -> String {
    format!("{NON_ROUTABLE} {domain}{LINE_ENDING}")
}

/// Domain of a blocking line, as written (no normalization).
pub fn blocked_entry(line: &str) -> Option<&str> {
    let mut tokens = line.split_whitespace();
    if tokens.next()? != NON_ROUTABLE {
        return None;
    }
    tokens.next().filter(|t| !t.starts_with('#'))
}

/// Host name of a line that maps exactly one name (a trailing `#` comment is allowed).
/// Comment lines and lines with aliases yield `None`.
fn sole_host(line: &str) -> Option<&str> {
    let mut tokens = line.split_whitespace();
    if tokens.next()?.starts_with('#') {
        return None;
    }
    let host = tokens.next().filter(|t| !t.starts_with('#'))?;
    match tokens.next() {
        None => Some(host),
        Some(t) if t.starts_with('#') => Some(host),
        Some(_) => None,
    }
}

fn same_host(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

/// Read the next line, terminator included, into `buf`. `false` at end of input.
fn next_line(reader: &mut impl BufRead, buf: &mut Vec<u8>) -> io::Result<bool> {
    buf.clear();
    Ok(reader.read_until(b'\n', buf)? > 0)
}

fn read_blocked(path: &Path) -> Result<BTreeSet<String>> {
    let mut reader = BufReader::new(File::open(path).at(path)?);
    let mut blocked = BTreeSet::new();
    let mut raw = Vec::new();
    while next_line(&mut reader, &mut raw).at(path)? {
        if let Some(entry) = blocked_entry(&String::from_utf8_lossy(&raw)) {
            blocked.insert(entry.to_string());
        }
    }
    Ok(blocked)
}

/// Copy `src` over `dst` unchanged. `src` is read first so a missing source never truncates `dst`.
fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    let mut content = Vec::new();
    File::open(src)
        .and_then(|mut f| f.read_to_end(&mut content))
        .at(src)?;
    let mut out = File::create(dst).at(dst)?;
    out.write_all(&content).at(dst)?;
    out.flush().at(dst)
}

fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
