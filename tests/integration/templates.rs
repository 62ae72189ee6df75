//! Tests for `trellis templates`

use crate::common::trellis_command;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_templates_lists_builtins() {
    let temp = TempDir::new().unwrap();

    let output = trellis_command(temp.path(), temp.path())
        .arg("templates")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("node-app"));
    assert!(stdout.contains("express-api"));
    assert!(stdout.contains("built-in"));
}

#[test]
fn test_templates_lists_user_templates() {
    let temp = TempDir::new().unwrap();
    // User templates live under the isolated config home
    let user_templates = temp
        .path()
        .join("xdg-config")
        .join("trellis")
        .join("templates")
        .join("mine");
    fs::create_dir_all(&user_templates).unwrap();
    fs::write(
        user_templates.join("template.yaml"),
        "name: mine\ndescription: A user template\n",
    )
    .unwrap();

    let output = trellis_command(temp.path(), temp.path())
        .arg("templates")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("mine"), "stdout: {}", stdout);
    assert!(stdout.contains("local"));
}
