//! Loading the blocked set from the hosts file.

mod common;

use hostblock::config::HostblockPaths;
use hostblock::hosts::blocked_entry;
use hostblock::{HostsError, HostsStore};

#[test]
fn only_non_routable_lines_tracked() {
    let dir = common::temp_dir();
    let (store, _) = common::store_with(&dir, "0.0.0.0 a.co\n1.2.3.4 other.com\n");
    assert_eq!(common::tracked(&store), vec!["a.co"]);
    assert!(!store.contains("other.com"));
}

#[test]
fn entries_kept_as_written() {
    let dir = common::temp_dir();
    let (store, _) = common::store_with(
        &dir,
        "# comment\n\n0.0.0.0\twww.Example.com\n0.0.0.0 ads.test # tracker\n0.0.0.0\n127.0.0.1 localhost\n",
    );
    assert_eq!(common::tracked(&store), vec!["ads.test", "www.Example.com"]);
}

#[test]
fn missing_hosts_file_is_io_error() {
    let dir = common::temp_dir();
    let paths = HostblockPaths::for_test(dir.path());
    let err = HostsStore::open(&paths).unwrap_err();
    assert!(matches!(err, HostsError::Io { .. }));
    assert!(!err.is_advisory());
}

#[test]
fn list_empty_set_is_advisory() {
    let dir = common::temp_dir();
    let (store, _) = common::store_with(&dir, "127.0.0.1 localhost\n");
    let err = store.list_domains().unwrap_err();
    assert!(matches!(err, HostsError::EmptySet));
    assert!(err.is_advisory());
}

#[test]
fn list_is_sorted_and_restartable() {
    let dir = common::temp_dir();
    let (store, _) = common::store_with(&dir, "0.0.0.0 b.co\n0.0.0.0 a.co\n0.0.0.0 c.co\n");
    let domains = store.list_domains().unwrap();
    assert_eq!(domains.len(), 3);
    let first: Vec<&str> = domains.clone().collect();
    let second: Vec<&str> = domains.collect();
    assert_eq!(first, vec!["a.co", "b.co", "c.co"]);
    assert_eq!(first, second);
}

#[test]
fn blocked_entry_parses_address_field() {
    assert_eq!(blocked_entry("0.0.0.0 a.co"), Some("a.co"));
    assert_eq!(blocked_entry("  0.0.0.0   a.co  x"), Some("a.co"));
    assert_eq!(blocked_entry("0.0.0.01 a.co"), None);
    assert_eq!(blocked_entry("127.0.0.1 a.co"), None);
    assert_eq!(blocked_entry("0.0.0.0 # nothing"), None);
}

#[test]
fn non_utf8_bytes_do_not_block_load() {
    let dir = common::temp_dir();
    let paths = HostblockPaths::for_test(dir.path());
    std::fs::write(&paths.hosts_file, b"# caf\xe9 comment\n0.0.0.0 a.co\n").unwrap();

    let store = HostsStore::open(&paths).unwrap();

    assert_eq!(common::tracked(&store), vec!["a.co"]);
}
