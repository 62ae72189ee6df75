use crate::cli::prompt::{DialoguerInput, UserInput};
use serde_json::{Map, Value};
use std::env;
use std::path::Path;
use trellis::di::ServiceContainer;
use trellis::manifest::{InstallOptions, ProjectManifest};
use trellis::template::{TemplateDiscovery, TemplateRenderer};
use trellis::{TrellisError, TrellisResult};
use trellis_core::core::path::find_package_json;

pub struct GenerateOptions {
    /// Template name to render
    pub template: String,
    /// KEY=VALUE variable assignments
    pub vars: Vec<String>,
}

pub async fn run(container: &ServiceContainer, options: GenerateOptions) -> TrellisResult<()> {
    let current_dir = env::current_dir()
        .map_err(|e| TrellisError::Path(format!("Failed to get current directory: {}", e)))?;
    run_in_dir(container, &current_dir, options, &DialoguerInput).await
}

pub async fn run_in_dir(
    container: &ServiceContainer,
    dir: &Path,
    options: GenerateOptions,
    input: &dyn UserInput,
) -> TrellisResult<()> {
    if find_package_json(dir).is_none() {
        return Err(TrellisError::Package(
            "No package.json found in this directory or any parent. Run `trellis init` first."
                .to_string(),
        ));
    }

    let config = container.config();
    let mut manifest = ProjectManifest::load(dir, container.runner())?;

    let info =
        TemplateDiscovery::find_template(&options.template, &super::extra_template_dirs(config))?;
    let renderer = TemplateRenderer::new(info)?;

    let mut scope = Map::new();
    scope.insert(
        "trellisVersion".to_string(),
        Value::String(config.pinned_version()),
    );
    scope.insert("name".to_string(), Value::String(manifest.name().to_string()));
    scope.insert(
        "description".to_string(),
        Value::String(manifest.description().to_string()),
    );
    for assignment in &options.vars {
        let (key, value) = parse_var(assignment)?;
        scope.insert(key, Value::String(value));
    }

    // Ask for anything required that neither the flags nor a metadata
    // default covers.
    for variable in &renderer.metadata().variables {
        if variable.required && variable.default.is_none() && !scope.contains_key(&variable.name) {
            let prompt = variable.description.as_deref().unwrap_or(&variable.name);
            let answer = input.prompt_string(prompt, None, false)?;
            scope.insert(variable.name.clone(), Value::String(answer));
        }
    }
    let scope = Value::Object(scope);

    let root = manifest.root_dir().to_path_buf();
    let written = renderer.render(&root, &scope)?;
    println!(
        "✓ Rendered {} file(s) from '{}'",
        written.len(),
        options.template
    );

    for (name, version) in &renderer.metadata().dependencies {
        manifest.add_dependency(name, version, &scope);
    }
    for (name, version) in &renderer.metadata().dev_dependencies {
        manifest.add_dev_dependency(name, version, &scope);
    }

    if manifest.rewrite() || manifest.reinstall() {
        manifest
            .install(&InstallOptions {
                package_manager: config.package_manager().parse()?,
                verbose: config.verbose(),
            })
            .await?;
    }

    Ok(())
}

fn parse_var(assignment: &str) -> TrellisResult<(String, String)> {
    match assignment.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(TrellisError::Config(format!(
            "Invalid variable assignment '{}'. Expected KEY=VALUE",
            assignment
        ))),
    }
}
