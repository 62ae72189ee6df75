use std::env;
use trellis::di::ServiceContainer;
use trellis::manifest::{InstallOptions, ProjectManifest};
use trellis::{TrellisError, TrellisResult};
use trellis_core::core::path::find_package_json;

pub async fn run(
    container: &ServiceContainer,
    script: String,
    ignore_error: bool,
) -> TrellisResult<()> {
    let current_dir = env::current_dir()
        .map_err(|e| TrellisError::Path(format!("Failed to get current directory: {}", e)))?;

    if find_package_json(&current_dir).is_none() {
        return Err(TrellisError::Package(
            "No package.json found in this directory or any parent".to_string(),
        ));
    }

    let config = container.config();
    let manifest = ProjectManifest::load(&current_dir, container.runner())?;

    if manifest.scripts().get(&script).is_none() {
        return Err(TrellisError::Script(format!(
            "Script '{}' not found in package.json",
            script
        )));
    }

    let output = manifest
        .run_script(
            &script,
            ignore_error,
            &InstallOptions {
                package_manager: config.package_manager().parse()?,
                verbose: false,
            },
        )
        .await?;

    if !output.stdout.is_empty() {
        print!("{}", output.stdout);
    }
    if !output.stderr.is_empty() {
        eprint!("{}", output.stderr);
    }
    Ok(())
}
