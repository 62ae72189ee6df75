//! Tests for `trellis add`

use crate::common::trellis_command;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_add_outside_project() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("nowhere");
    fs::create_dir_all(&dir).unwrap();

    let output = trellis_command(&dir, temp.path())
        .arg("add")
        .arg("express")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No package.json"));
}

#[test]
fn test_add_requires_package_argument() {
    let temp = TempDir::new().unwrap();

    let output = trellis_command(temp.path(), temp.path())
        .arg("add")
        .output()
        .unwrap();

    // clap rejects the missing positional before any project lookup
    assert!(!output.status.success());
}
