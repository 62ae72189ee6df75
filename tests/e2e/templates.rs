use crate::TestContext;
use predicates::prelude::*;

#[test]
fn templates_lists_builtin_starters() {
    let ctx = TestContext::new();

    ctx.trellis()
        .arg("templates")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("node-app").and(predicate::str::contains("express-api")),
        );
}
