use serde_json::json;
use std::env;
use trellis::di::ServiceContainer;
use trellis::manifest::{InstallOptions, ProjectManifest};
use trellis::{TrellisError, TrellisResult};
use trellis_core::core::path::find_package_json;

pub struct AddOptions {
    pub packages: Vec<String>,
    pub dev: bool,
}

pub async fn run(container: &ServiceContainer, options: AddOptions) -> TrellisResult<()> {
    let current_dir = env::current_dir()
        .map_err(|e| TrellisError::Path(format!("Failed to get current directory: {}", e)))?;

    if find_package_json(&current_dir).is_none() {
        return Err(TrellisError::Package(
            "No package.json found in this directory or any parent. Run `trellis init` first."
                .to_string(),
        ));
    }

    let config = container.config();
    let mut manifest = ProjectManifest::load(&current_dir, container.runner())?;
    let scope = json!({ "trellisVersion": config.pinned_version() });

    for spec in &options.packages {
        let (name, version) = split_spec(spec)?;
        if options.dev {
            manifest.add_dev_dependency(&name, &version, &scope);
        } else {
            manifest.add_dependency(&name, &version, &scope);
        }
    }

    manifest
        .install(&InstallOptions {
            package_manager: config.package_manager().parse()?,
            verbose: config.verbose(),
        })
        .await
}

/// Split a command-line package spec into name and version. A leading
/// `@` belongs to the scope, not the version separator; a bare name
/// means "latest".
fn split_spec(spec: &str) -> TrellisResult<(String, String)> {
    if spec.is_empty() {
        return Err(TrellisError::Package("Empty package name".to_string()));
    }
    match spec[1..].find('@') {
        Some(pos) => {
            let at = pos + 1;
            Ok((spec[..at].to_string(), spec[at + 1..].to_string()))
        }
        None => Ok((spec.to_string(), "latest".to_string())),
    }
}
