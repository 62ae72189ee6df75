//! Tests for `trellis install`

use crate::common::trellis_command;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_install_outside_project() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("nowhere");
    fs::create_dir_all(&dir).unwrap();

    let output = trellis_command(&dir, temp.path())
        .arg("install")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No package.json"));
}

#[test]
fn test_install_rejects_unknown_package_manager() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("proj");
    fs::create_dir_all(&project).unwrap();
    fs::write(
        project.join("package.json"),
        r#"{"name": "proj", "version": "1.0.0"}"#,
    )
    .unwrap();

    let output = trellis_command(&project, temp.path())
        .arg("install")
        .arg("--package-manager")
        .arg("pnpm")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown package manager"));
}
