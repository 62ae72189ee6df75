//! CLI subcommands, one module per command.

use std::path::PathBuf;
use trellis::di::ConfigProvider;

pub mod add;
pub mod generate;
pub mod init;
pub mod install;
pub mod new;
pub mod prompt;
pub mod run;
pub mod templates;

/// Extra template search directories from configuration.
pub(crate) fn extra_template_dirs(config: &dyn ConfigProvider) -> Vec<PathBuf> {
    config
        .template_dirs()
        .map(|dirs| dirs.iter().map(PathBuf::from).collect())
        .unwrap_or_default()
}
