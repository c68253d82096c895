use std::fs;

use jarviz::{canonicalize_or_current, init_logging, sha256_bytes};
use tempfile::tempdir;

#[test]
fn canonicalize_or_current_returns_cwd_for_dot() {
    let cwd = std::env::current_dir().expect("cwd");
    let result = canonicalize_or_current(".").expect("canonicalize");
    assert_eq!(result, cwd);
}

#[test]
fn canonicalize_or_current_resolves_existing_path() {
    let tmp = tempdir().expect("tempdir");
    let jar = tmp.path().join("app.jar");
    fs::write(&jar, b"PK").expect("write jar");

    let result = canonicalize_or_current(jar.to_str().expect("utf8 path")).expect("canonicalize");
    assert_eq!(result, jar.canonicalize().expect("canonicalize jar"));
}

#[test]
fn canonicalize_or_current_joins_missing_path_onto_cwd() {
    let cwd = std::env::current_dir().expect("cwd");
    let result = canonicalize_or_current("does-not-exist/app.jar").expect("fallback");
    assert_eq!(result, cwd.join("does-not-exist/app.jar"));
}

#[test]
fn sha256_bytes_matches_known_digest() {
    assert_eq!(
        sha256_bytes(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(sha256_bytes(b"").len(), 64);
}

#[test]
fn init_logging_is_idempotent() {
    init_logging();
    init_logging();
    tracing::info!("logging initialized twice");
}
