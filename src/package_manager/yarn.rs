use super::PackageManager;
use trellis_core::TrellisError;

/// Failure signature yarn prints when yarn.lock no longer matches
/// package.json under --frozen-lockfile / CI settings.
const LOCKFILE_STALE_SIGNATURE: &str = "error Your lockfile needs to be updated";

const LOCKFILE_STALE_HELP: &str =
    "yarn.lock file is outdated. Run yarn, commit the updated lockfile and try again.";

/// The yarn backend.
pub struct Yarn;

impl PackageManager for Yarn {
    fn program(&self) -> &'static str {
        "yarn"
    }

    fn install_args(&self, verbose: bool) -> Vec<String> {
        let mut args = vec!["install".to_string(), "--production=false".to_string()];
        if verbose {
            args.push("--verbose".to_string());
        }
        args
    }

    fn add_args(&self, targets: &[String], dev: bool, verbose: bool) -> Vec<String> {
        let mut args = vec!["add".to_string()];
        if dev {
            args.push("--dev".to_string());
        }
        args.extend(targets.iter().cloned());
        if verbose {
            args.push("--verbose".to_string());
        }
        args
    }

    fn run_script_args(&self, script: &str) -> Vec<String> {
        vec!["run".to_string(), script.to_string()]
    }

    fn translate_error(&self, err: TrellisError) -> TrellisError {
        match err {
            TrellisError::Subprocess { ref output, .. }
                if output.trim_start().starts_with(LOCKFILE_STALE_SIGNATURE) =>
            {
                TrellisError::Install(LOCKFILE_STALE_HELP.to_string())
            }
            other => other,
        }
    }
}
