use crate::TestContext;
use assert_fs::prelude::*;
use predicates::prelude::*;

#[test]
fn init_creates_package_json() {
    let ctx = TestContext::new();

    ctx.trellis().arg("init").arg("--yes").assert().success();

    let package_json = ctx.temp.child("package.json");
    package_json.assert(predicate::path::exists());
    package_json.assert(predicate::str::contains("\"name\""));
    package_json.assert(predicate::str::contains("\"version\": \"1.0.0\""));
}

#[test]
fn init_fails_if_already_initialized() {
    let ctx = TestContext::new();
    ctx.temp
        .child("package.json")
        .write_str("{\"name\": \"existing\"}\n")
        .unwrap();

    ctx.trellis()
        .arg("init")
        .arg("--yes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn new_creates_project_directory() {
    let ctx = TestContext::new();

    ctx.trellis()
        .arg("new")
        .arg("fresh-app")
        .arg("--yes")
        .assert()
        .success();

    let package_json = ctx.temp.child("fresh-app/package.json");
    package_json.assert(predicate::path::exists());
    package_json.assert(predicate::str::contains("\"name\": \"fresh-app\""));
}
