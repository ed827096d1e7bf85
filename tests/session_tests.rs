// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use kakeibo::session::SessionStore;

#[test]
fn absent_file_reads_as_an_empty_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::at(dir.path().join("session.json"));

    assert_eq!(store.access_token(), "");
    assert_eq!(store.refresh_cookie(), None);
}

#[test]
fn store_and_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::at(dir.path().join("session.json"));

    store.store("tok-1", Some("refresh_token=abc".into())).unwrap();
    assert_eq!(store.access_token(), "tok-1");
    assert_eq!(store.refresh_cookie().as_deref(), Some("refresh_token=abc"));
}

#[test]
fn refreshing_the_token_keeps_the_cookie() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::at(dir.path().join("session.json"));

    store.store("tok-1", Some("refresh_token=abc".into())).unwrap();
    store.store_access_token("tok-2").unwrap();

    assert_eq!(store.access_token(), "tok-2");
    assert_eq!(store.refresh_cookie().as_deref(), Some("refresh_token=abc"));
}

#[test]
fn clear_removes_the_session_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::at(dir.path().join("session.json"));

    store.store("tok-1", None).unwrap();
    store.clear().unwrap();
    assert_eq!(store.access_token(), "");

    // Clearing an already-empty session is fine.
    store.clear().unwrap();
}

#[test]
fn a_corrupt_file_reads_as_empty_rather_than_failing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json at all").unwrap();
    let store = SessionStore::at(path);

    assert_eq!(store.access_token(), "");
}
