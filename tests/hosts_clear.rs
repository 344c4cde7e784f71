//! Clearing every blocked domain.

mod common;

use hostblock::hosts::blocked_entry;
use hostblock::HostsError;

#[test]
fn clear_removes_every_blocking_line() {
    let dir = common::temp_dir();
    let (mut store, paths) = common::store_with(
        &dir,
        "127.0.0.1 localhost\n0.0.0.0 a.co\n0.0.0.0 www.a.co\n# note\n0.0.0.0 B.co\n0.0.0.0 www.only.co\n",
    );

    assert_eq!(store.clear_all().unwrap(), 4);

    assert!(store.is_empty());
    let content = common::read(&paths.hosts_file);
    assert_eq!(content.lines().filter_map(blocked_entry).count(), 0);
    assert_eq!(content, "127.0.0.1 localhost\n# note\n");
}

#[test]
fn clear_after_blocking() {
    let dir = common::temp_dir();
    let (mut store, paths) = common::store_with(&dir, "::1 localhost\n");
    store.block_domain("a.co").unwrap();
    store.block_domain("b.co").unwrap();

    store.clear_all().unwrap();

    assert!(store.list_domains().is_err());
    assert_eq!(common::read(&paths.hosts_file), "::1 localhost\n");
}

#[test]
fn clear_on_empty_set_is_noop() {
    let dir = common::temp_dir();
    let (mut store, paths) = common::store_with(&dir, "127.0.0.1 localhost\n");

    let err = store.clear_all().unwrap_err();

    assert!(matches!(err, HostsError::EmptySet));
    assert_eq!(common::read(&paths.hosts_file), "127.0.0.1 localhost\n");
}

#[test]
fn clear_propagates_io_error() {
    let dir = common::temp_dir();
    let (mut store, paths) = common::store_with(&dir, "0.0.0.0 a.co\n");
    std::fs::remove_file(&paths.hosts_file).unwrap();

    assert!(matches!(store.clear_all().unwrap_err(), HostsError::Io { .. }));
    assert!(store.contains("a.co"));
}

#[test]
fn clear_removes_nested_www_and_bare_www_entries() {
    let dir = common::temp_dir();
    let (mut store, paths) = common::store_with(
        &dir,
        "127.0.0.1 localhost\n0.0.0.0 www.www.x.co\n0.0.0.0 www.\n0.0.0.0 x.co\n",
    );

    assert_eq!(store.clear_all().unwrap(), 3);

    assert!(store.is_empty());
    assert_eq!(common::read(&paths.hosts_file), "127.0.0.1 localhost\n");
}
