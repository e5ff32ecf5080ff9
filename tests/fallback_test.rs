use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[cfg(not(feature = "storage-rocksdb"))]
#[test]
fn test_rocksdb_fallback_warning() {
    let mut cmd = Command::new(cargo_bin!("quickloan"));
    cmd.arg("--db-path")
        .arg("some_db")
        .arg("submit")
        .arg("tests/fixtures/application.json")
        .env_remove("RUST_LOG");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("falling back to in-memory"));
}

#[cfg(feature = "storage-rocksdb")]
#[test]
fn test_rocksdb_no_fallback_warning() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    let mut cmd = Command::new(cargo_bin!("quickloan"));
    cmd.arg("--db-path")
        .arg(&db_path)
        .arg("submit")
        .arg("tests/fixtures/application.json");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("falling back").not());
}
