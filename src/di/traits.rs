//! Trait definitions for dependency injection

use async_trait::async_trait;
use std::path::Path;
use trellis_core::TrellisResult;

/// Trait for configuration access
///
/// Provides read-only access to application configuration.
/// Implementations should be thread-safe (Send + Sync).
pub trait ConfigProvider: Send + Sync {
    /// Get the preferred package manager ("yarn" or "npm")
    fn package_manager(&self) -> &str;

    /// Check if package-manager invocations should stream full output
    fn verbose(&self) -> bool;

    /// Get additional template search directories (optional)
    fn template_dirs(&self) -> Option<&Vec<String>>;

    /// Get the version substituted for `{{trellisVersion}}` in generated
    /// manifests
    fn pinned_version(&self) -> String;
}

/// Captured output of a finished subprocess.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Trait for subprocess execution
///
/// All package-manager invocations go through this seam so install
/// pipelines can be exercised without touching the network.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run a command to completion in `cwd`, capturing its output.
    ///
    /// A non-zero exit turns into `TrellisError::Subprocess` carrying the
    /// raw tool output. When `verbose` is set the captured output is also
    /// echoed to the terminal.
    async fn run(
        &self,
        command: &str,
        args: &[String],
        cwd: &Path,
        verbose: bool,
    ) -> TrellisResult<CommandOutput>;

    /// Run a command synchronously. Used for cheap probes such as
    /// `yarn --version`.
    fn run_sync(&self, command: &str, args: &[String]) -> TrellisResult<CommandOutput>;
}
