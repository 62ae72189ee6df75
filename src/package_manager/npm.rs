use super::PackageManager;

/// The npm backend. No error translation; npm's own messages are
/// surfaced as-is.
pub struct Npm;

impl PackageManager for Npm {
    fn program(&self) -> &'static str {
        "npm"
    }

    fn install_args(&self, verbose: bool) -> Vec<String> {
        let mut args = vec!["install".to_string(), "--no-production".to_string()];
        if verbose {
            args.push("--verbose".to_string());
        }
        args
    }

    fn add_args(&self, targets: &[String], dev: bool, verbose: bool) -> Vec<String> {
        let mut args = vec!["install".to_string()];
        if dev {
            args.push("--save-dev".to_string());
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
}
