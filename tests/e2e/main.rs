//! End-to-end tests exercising full CLI workflows.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;

mod init;
mod templates;
mod workflow;

/// Test context that provides an isolated environment for each test
pub struct TestContext {
    pub temp: TempDir,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Create a new test context with isolated environment
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    /// Build a trellis command running inside the context's project
    /// directory, with config isolated from the real user environment
    pub fn trellis(&self) -> Command {
        let mut cmd = Command::cargo_bin("trellis").unwrap();
        cmd.current_dir(self.temp.path());
        cmd.env("HOME", self.temp.path());
        cmd.env("XDG_CONFIG_HOME", self.temp.child("xdg-config").path());
        cmd
    }
}
