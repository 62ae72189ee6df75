//! Mock implementations of service traits for testing

use super::traits::{CommandOutput, ConfigProvider, ProcessRunner};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use trellis_core::{TrellisError, TrellisResult};

/// Mock configuration provider for testing
#[derive(Clone)]
pub struct MockConfigProvider {
    pub package_manager: String,
    pub verbose: bool,
    pub template_dirs: Option<Vec<String>>,
    pub pinned_version: String,
}

impl Default for MockConfigProvider {
    fn default() -> Self {
        Self {
            package_manager: "yarn".to_string(),
            verbose: false,
            template_dirs: None,
            pinned_version: "1.0.0".to_string(),
        }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn package_manager(&self) -> &str {
        &self.package_manager
    }

    fn verbose(&self) -> bool {
        self.verbose
    }

    fn template_dirs(&self) -> Option<&Vec<String>> {
        self.template_dirs.as_ref()
    }

    fn pinned_version(&self) -> String {
        self.pinned_version.clone()
    }
}

/// One subprocess invocation observed by [`MockProcessRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub command: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub sync: bool,
}

impl RecordedCall {
    /// The full command line, for substring assertions.
    pub fn line(&self) -> String {
        if self.args.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, self.args.join(" "))
        }
    }
}

/// Mock subprocess runner for testing
///
/// Records every invocation and succeeds with empty output unless a
/// failure has been scripted for a matching command line.
#[derive(Clone, Default)]
pub struct MockProcessRunner {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    failures: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockProcessRunner {
    /// Create a new mock runner where every command succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a failure: any command line containing `fragment` fails
    /// with `output` as the captured tool output.
    pub fn fail_when(&self, fragment: &str, output: &str) {
        self.failures
            .lock()
            .unwrap()
            .push((fragment.to_string(), output.to_string()));
    }

    /// Get all recorded invocations
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the recorded command lines, in invocation order
    pub fn lines(&self) -> Vec<String> {
        self.calls().iter().map(RecordedCall::line).collect()
    }

    fn record(&self, call: RecordedCall) -> TrellisResult<CommandOutput> {
        let line = call.line();
        self.calls.lock().unwrap().push(call);

        let failures = self.failures.lock().unwrap();
        if let Some((_, output)) = failures.iter().find(|(fragment, _)| line.contains(fragment)) {
            return Err(TrellisError::Subprocess {
                command: line,
                output: output.clone(),
            });
        }
        Ok(CommandOutput::default())
    }
}

#[async_trait]
impl ProcessRunner for MockProcessRunner {
    async fn run(
        &self,
        command: &str,
        args: &[String],
        cwd: &Path,
        _verbose: bool,
    ) -> TrellisResult<CommandOutput> {
        self.record(RecordedCall {
            command: command.to_string(),
            args: args.to_vec(),
            cwd: Some(cwd.to_path_buf()),
            sync: false,
        })
    }

    fn run_sync(&self, command: &str, args: &[String]) -> TrellisResult<CommandOutput> {
        self.record(RecordedCall {
            command: command.to_string(),
            args: args.to_vec(),
            cwd: None,
            sync: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_runner_records_calls() {
        let runner = MockProcessRunner::new();
        runner
            .run("yarn", &["install".to_string()], Path::new("/tmp"), false)
            .await
            .unwrap();
        runner.run_sync("yarn", &["--version".to_string()]).unwrap();

        let lines = runner.lines();
        assert_eq!(lines, vec!["yarn install", "yarn --version"]);
        assert!(runner.calls()[1].sync);
    }

    #[tokio::test]
    async fn test_mock_runner_scripted_failure() {
        let runner = MockProcessRunner::new();
        runner.fail_when("yarn install", "boom");

        let err = runner
            .run("yarn", &["install".to_string()], Path::new("/tmp"), false)
            .await
            .unwrap_err();
        match err {
            TrellisError::Subprocess { output, .. } => assert_eq!(output, "boom"),
            other => panic!("unexpected error: {}", other),
        }
    }
}
