//! Shared test helpers.

#![allow(dead_code)]

use hostblock::config::HostblockPaths;
use hostblock::HostsStore;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a temp directory holding the hosts file and its backup.
pub fn temp_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("hostblock_test_")
        .tempdir()
        .expect("temp dir")
}

/// Write `content` as the hosts file in `dir` and return the paths pointing at it.
pub fn hosts_with(dir: &TempDir, content: &str) -> HostblockPaths {
    let paths = HostblockPaths::for_test(dir.path());
    fs::write(&paths.hosts_file, content).unwrap();
    paths
}

/// Open a store over a fresh hosts file with `content`.
pub fn store_with(dir: &TempDir, content: &str) -> (HostsStore, HostblockPaths) {
    let paths = hosts_with(dir, content);
    let store = HostsStore::open(&paths).unwrap();
    (store, paths)
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

/// All tracked entries, sorted.
pub fn tracked(store: &HostsStore) -> Vec<String> {
    store
        .list_domains()
        .map(|d| d.map(String::from).collect())
        .unwrap_or_default()
}
