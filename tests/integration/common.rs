//! Common utilities for integration tests

use std::path::Path;
use std::process::Command;

/// Build a trellis command running in `project_dir`, with config and
/// home isolated under `home` so tests never touch the real user
/// environment.
pub fn trellis_command(project_dir: &Path, home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_trellis"));
    cmd.current_dir(project_dir);
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join("xdg-config"));
    cmd
}
