//! Real subprocess execution

use crate::di::traits::{CommandOutput, ProcessRunner};
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;
use trellis_core::{TrellisError, TrellisResult};

/// Subprocess runner backed by the system shell environment.
///
/// Binaries are resolved through PATH before spawning so a missing
/// package manager surfaces as a clear message instead of a raw ENOENT.
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    fn resolve(command: &str) -> TrellisResult<std::path::PathBuf> {
        which::which(command).map_err(|_| {
            TrellisError::Package(format!("'{}' was not found in PATH", command))
        })
    }

    fn finish(command_line: String, output: std::process::Output, verbose: bool) -> TrellisResult<CommandOutput> {
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if verbose {
            if !stdout.is_empty() {
                print!("{}", stdout);
            }
            if !stderr.is_empty() {
                eprint!("{}", stderr);
            }
        }

        if output.status.success() {
            Ok(CommandOutput { stdout, stderr })
        } else {
            // Yarn reports failures on stderr, npm occasionally on stdout
            let message = if stderr.trim().is_empty() { stdout } else { stderr };
            Err(TrellisError::Subprocess {
                command: command_line,
                output: message.trim_end().to_string(),
            })
        }
    }
}

#[async_trait]
impl ProcessRunner for SystemProcessRunner {
    async fn run(
        &self,
        command: &str,
        args: &[String],
        cwd: &Path,
        verbose: bool,
    ) -> TrellisResult<CommandOutput> {
        let program = Self::resolve(command)?;
        debug!(command, ?args, cwd = %cwd.display(), "spawning subprocess");

        let output = tokio::process::Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .await?;

        Self::finish(format!("{} {}", command, args.join(" ")), output, verbose)
    }

    fn run_sync(&self, command: &str, args: &[String]) -> TrellisResult<CommandOutput> {
        let program = Self::resolve(command)?;
        debug!(command, ?args, "running subprocess (sync)");

        let output = std::process::Command::new(program).args(args).output()?;
        Self::finish(format!("{} {}", command, args.join(" ")), output, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_sync_missing_binary() {
        let runner = SystemProcessRunner;
        let result = runner.run_sync("definitely-not-a-real-binary-6502", &[]);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("not found in PATH"));
    }

    #[tokio::test]
    async fn test_run_captures_output() {
        let runner = SystemProcessRunner;
        let output = runner
            .run("echo", &["hello".to_string()], Path::new("."), false)
            .await
            .unwrap();
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn test_run_nonzero_exit_is_subprocess_error() {
        let runner = SystemProcessRunner;
        let result = runner
            .run("false", &[], Path::new("."), false)
            .await;
        assert!(matches!(result, Err(TrellisError::Subprocess { .. })));
    }
}
