use std::env;
use trellis::di::ServiceContainer;
use trellis::manifest::{InstallOptions, ProjectManifest};
use trellis::package_manager::PackageManagerKind;
use trellis::{TrellisError, TrellisResult};
use trellis_core::core::path::find_package_json;

pub struct InstallCliOptions {
    pub package_manager: Option<String>,
    pub verbose: bool,
}

pub async fn run(container: &ServiceContainer, options: InstallCliOptions) -> TrellisResult<()> {
    let current_dir = env::current_dir()
        .map_err(|e| TrellisError::Path(format!("Failed to get current directory: {}", e)))?;

    if find_package_json(&current_dir).is_none() {
        return Err(TrellisError::Package(
            "No package.json found in this directory or any parent. Run `trellis init` first."
                .to_string(),
        ));
    }

    let config = container.config();
    let package_manager: PackageManagerKind = options
        .package_manager
        .as_deref()
        .unwrap_or(config.package_manager())
        .parse()?;

    let mut manifest = ProjectManifest::load(&current_dir, container.runner())?;
    manifest.mark_reinstall();
    manifest
        .install(&InstallOptions {
            package_manager,
            verbose: options.verbose || config.verbose(),
        })
        .await
}
