//! Multi-command flows: scaffold a project, then build on it.

use crate::TestContext;
use assert_fs::prelude::*;
use predicates::prelude::*;

#[test]
fn init_then_generate_renders_into_project() {
    let ctx = TestContext::new();

    ctx.trellis().arg("init").arg("--yes").assert().success();

    // node-app has no dependencies, so no package manager is invoked
    ctx.trellis()
        .arg("generate")
        .arg("node-app")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered"));

    ctx.temp
        .child("src/index.js")
        .assert(predicate::path::exists());
    ctx.temp.child("README.md").assert(predicate::path::exists());
}

#[test]
fn generate_with_variable_overrides() {
    let ctx = TestContext::new();

    ctx.trellis().arg("init").arg("--yes").assert().success();

    // Shadow the project name through an explicit variable
    ctx.trellis()
        .arg("generate")
        .arg("node-app")
        .arg("--var")
        .arg("name=override")
        .assert()
        .success();

    ctx.temp
        .child("src/index.js")
        .assert(predicate::str::contains("override is running"));
}

#[test]
fn run_reports_missing_script() {
    let ctx = TestContext::new();

    ctx.trellis().arg("init").arg("--yes").assert().success();

    ctx.trellis()
        .arg("run")
        .arg("not-a-script")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
