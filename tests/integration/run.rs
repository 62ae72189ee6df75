//! Tests for `trellis run`

use crate::common::trellis_command;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_run_without_manifest() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("empty");
    fs::create_dir_all(&project).unwrap();

    let output = trellis_command(&project, temp.path())
        .arg("run")
        .arg("test")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No package.json"));
}

#[test]
fn test_run_nonexistent_script() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("proj");
    fs::create_dir_all(&project).unwrap();
    fs::write(
        project.join("package.json"),
        r#"{"name": "proj", "version": "1.0.0", "scripts": {}}"#,
    )
    .unwrap();

    let output = trellis_command(&project, temp.path())
        .arg("run")
        .arg("nonexistent-script")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "stderr: {}", stderr);
}
