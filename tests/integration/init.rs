//! Tests for `trellis init`

use crate::common::trellis_command;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_init_yes_writes_manifest() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("my-app");
    fs::create_dir_all(&project).unwrap();

    let output = trellis_command(&project, temp.path())
        .arg("init")
        .arg("--yes")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(project.join("package.json")).unwrap()).unwrap();
    assert_eq!(manifest["name"], "my-app");
    assert_eq!(manifest["version"], "1.0.0");
    assert!(manifest["scripts"]["start"].is_string());
}

#[test]
fn test_init_manifest_is_pretty_printed() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("pretty");
    fs::create_dir_all(&project).unwrap();

    trellis_command(&project, temp.path())
        .arg("init")
        .arg("--yes")
        .output()
        .unwrap();

    let content = fs::read_to_string(project.join("package.json")).unwrap();
    assert!(content.contains("\n  \"name\""), "expected 2-space indent");
    assert!(content.ends_with('\n'));
}

#[test]
fn test_init_fails_when_manifest_exists() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("taken");
    fs::create_dir_all(&project).unwrap();
    fs::write(project.join("package.json"), "{}").unwrap();

    let output = trellis_command(&project, temp.path())
        .arg("init")
        .arg("--yes")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already exists"));
}
