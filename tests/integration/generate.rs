//! Tests for `trellis generate`

use crate::common::trellis_command;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_generate_outside_project() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("nowhere");
    fs::create_dir_all(&dir).unwrap();

    let output = trellis_command(&dir, temp.path())
        .arg("generate")
        .arg("node-app")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No package.json"));
}

#[test]
fn test_generate_renders_builtin_template() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("proj");
    fs::create_dir_all(&project).unwrap();
    fs::write(
        project.join("package.json"),
        r#"{"name": "proj", "version": "1.0.0", "description": "demo"}"#,
    )
    .unwrap();

    // node-app carries no dependencies, so no package manager runs
    let output = trellis_command(&project, temp.path())
        .arg("generate")
        .arg("node-app")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let rendered = fs::read_to_string(project.join("src/index.js")).unwrap();
    assert!(rendered.contains("proj is running"));
    assert!(project.join("README.md").exists());
}

#[test]
fn test_generate_unknown_template() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("proj");
    fs::create_dir_all(&project).unwrap();
    fs::write(
        project.join("package.json"),
        r#"{"name": "proj", "version": "1.0.0"}"#,
    )
    .unwrap();

    let output = trellis_command(&project, temp.path())
        .arg("generate")
        .arg("no-such-template")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"));
}
