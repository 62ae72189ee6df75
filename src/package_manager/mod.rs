//! Package-manager backends
//!
//! Trellis never installs anything itself: it builds command lines for
//! one of two interchangeable backends (npm, yarn) and hands them to the
//! subprocess runner. The backend is selected once at the start of each
//! install cycle.

pub mod npm;
pub mod yarn;

pub use npm::Npm;
pub use yarn::Yarn;

use crate::di::ProcessRunner;
use crate::manifest::partition::partition_invalid;
use crate::manifest::ProjectManifest;
use crate::tasks::Task;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;
use trellis_core::{TrellisError, TrellisResult};

/// Which backend to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManagerKind {
    Npm,
    #[default]
    Yarn,
}

impl FromStr for PackageManagerKind {
    type Err = TrellisError;

    fn from_str(s: &str) -> TrellisResult<Self> {
        match s {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            other => Err(TrellisError::Config(format!(
                "Unknown package manager '{}'. Expected 'npm' or 'yarn'",
                other
            ))),
        }
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Npm => write!(f, "npm"),
            Self::Yarn => write!(f, "yarn"),
        }
    }
}

/// Command-line generator for one package-manager flavor.
pub trait PackageManager: Send + Sync {
    /// Binary name invoked in the project root
    fn program(&self) -> &'static str;

    /// Arguments for the bulk install of everything declared in the
    /// manifest, dev dependencies included
    fn install_args(&self, verbose: bool) -> Vec<String>;

    /// Arguments for adding the given install targets
    fn add_args(&self, targets: &[String], dev: bool, verbose: bool) -> Vec<String>;

    /// Arguments for running a manifest script
    fn run_script_args(&self, script: &str) -> Vec<String>;

    /// Map raw tool failures to clearer messages where a signature is
    /// recognized. The default keeps the error unchanged.
    fn translate_error(&self, err: TrellisError) -> TrellisError {
        err
    }
}

/// Resolve the backend for an install cycle.
///
/// A requested yarn backend is probed with `yarn --version`; probe
/// failure is not an error, it silently downgrades the cycle to npm.
pub fn select_backend(
    requested: PackageManagerKind,
    runner: &dyn ProcessRunner,
) -> Arc<dyn PackageManager> {
    match requested {
        PackageManagerKind::Npm => Arc::new(Npm),
        PackageManagerKind::Yarn => {
            if runner.run_sync("yarn", &["--version".to_string()]).is_ok() {
                Arc::new(Yarn)
            } else {
                debug!("yarn probe failed, falling back to npm");
                Arc::new(Npm)
            }
        }
    }
}

/// Build the three ordered install tasks for a reconcile cycle.
///
/// Skip predicates re-read the manifest when each task comes up, so they
/// observe flags and dependency sets as of execution time.
pub fn build_install_tasks(
    backend: Arc<dyn PackageManager>,
    verbose: bool,
) -> Vec<Task<ProjectManifest>> {
    let bulk = {
        let backend = backend.clone();
        Task::new("Install base dependencies", move |m: &ProjectManifest| {
            let backend = backend.clone();
            let runner = m.runner();
            let root = m.root_dir().to_path_buf();
            async move {
                runner
                    .run(
                        backend.program(),
                        &backend.install_args(verbose),
                        &root,
                        verbose,
                    )
                    .await
                    .map(drop)
                    .map_err(|e| backend.translate_error(e))
            }
        })
        .skip_if(|m: &ProjectManifest| {
            (!m.reinstall()).then(|| "dependencies are in sync".to_string())
        })
    };

    let add = {
        let backend = backend.clone();
        Task::new("Add dependencies", move |m: &ProjectManifest| {
            let backend = backend.clone();
            let runner = m.runner();
            let root = m.root_dir().to_path_buf();
            let targets = partition_invalid(&m.dependencies());
            async move {
                runner
                    .run(
                        backend.program(),
                        &backend.add_args(&targets, false, verbose),
                        &root,
                        verbose,
                    )
                    .await
                    .map(drop)
                    .map_err(|e| backend.translate_error(e))
            }
        })
        .skip_if(|m: &ProjectManifest| {
            partition_invalid(&m.dependencies())
                .is_empty()
                .then(|| "no pending dependencies".to_string())
        })
    };

    let add_dev = {
        let backend = backend.clone();
        Task::new("Add devDependencies", move |m: &ProjectManifest| {
            let backend = backend.clone();
            let runner = m.runner();
            let root = m.root_dir().to_path_buf();
            let targets = partition_invalid(&m.dev_dependencies());
            async move {
                runner
                    .run(
                        backend.program(),
                        &backend.add_args(&targets, true, verbose),
                        &root,
                        verbose,
                    )
                    .await
                    .map(drop)
                    .map_err(|e| backend.translate_error(e))
            }
        })
        .skip_if(|m: &ProjectManifest| {
            partition_invalid(&m.dev_dependencies())
                .is_empty()
                .then(|| "no pending devDependencies".to_string())
        })
    };

    vec![bulk, add, add_dev]
}
