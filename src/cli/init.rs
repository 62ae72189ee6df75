use crate::cli::prompt::{DialoguerInput, UserInput};
use serde_json::json;
use std::env;
use std::path::Path;
use trellis::di::{ConfigProvider, ServiceContainer};
use trellis::manifest::{InstallOptions, ProjectManifest};
use trellis::package_manager::PackageManagerKind;
use trellis::template::{TemplateDiscovery, TemplateRenderer};
use trellis::{TrellisError, TrellisResult};

/// Scripts offered during the wizard, with the commands they map to.
const COMMON_SCRIPTS: [(&str, &str, &str); 3] = [
    ("start", "node src/index.js", "Start the application"),
    ("dev", "nodemon src/index.js", "Start with automatic reload"),
    ("test", "node --test", "Run tests"),
];

pub struct InitOptions {
    pub template: Option<String>,
    pub yes: bool,
}

struct InitAnswers {
    name: String,
    version: String,
    description: String,
    package_manager: PackageManagerKind,
    template: Option<String>,
    scripts: Vec<(String, String)>,
}

pub async fn run(container: &ServiceContainer, options: InitOptions) -> TrellisResult<()> {
    let current_dir = env::current_dir()
        .map_err(|e| TrellisError::Path(format!("Failed to get current directory: {}", e)))?;
    run_in_dir(container, &current_dir, options, &DialoguerInput).await
}

pub async fn run_in_dir(
    container: &ServiceContainer,
    dir: &Path,
    options: InitOptions,
    input: &dyn UserInput,
) -> TrellisResult<()> {
    if dir.join("package.json").exists() {
        return Err(TrellisError::Package(
            "package.json already exists in this directory".to_string(),
        ));
    }

    let default_name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("my-project")
        .to_string();

    let answers = if options.yes {
        Some(default_answers(container.config(), &default_name, options.template))
    } else {
        run_wizard(container.config(), &default_name, options.template, input)?
    };

    let Some(answers) = answers else {
        println!("Cancelled.");
        return Ok(());
    };

    scaffold(container, dir, answers).await
}

fn default_answers(
    config: &dyn ConfigProvider,
    default_name: &str,
    template: Option<String>,
) -> InitAnswers {
    InitAnswers {
        name: default_name.to_string(),
        version: "1.0.0".to_string(),
        description: String::new(),
        package_manager: config.package_manager().parse().unwrap_or_default(),
        template,
        scripts: vec![(
            COMMON_SCRIPTS[0].0.to_string(),
            COMMON_SCRIPTS[0].1.to_string(),
        )],
    }
}

fn run_wizard(
    config: &dyn ConfigProvider,
    default_name: &str,
    template: Option<String>,
    input: &dyn UserInput,
) -> TrellisResult<Option<InitAnswers>> {
    println!("🚀 Trellis Project Wizard\n");

    let name = input.prompt_string("Project name", Some(default_name), false)?;
    validate_project_name(&name)?;

    let version = input.prompt_string("Project version", Some("1.0.0"), false)?;
    let description = input.prompt_string("Description (optional)", None, true)?;

    let managers = vec!["yarn".to_string(), "npm".to_string()];
    let default_manager = managers
        .iter()
        .position(|m| m == config.package_manager())
        .unwrap_or(0);
    let manager_choice = input.prompt_select("Package manager", &managers, default_manager)?;
    let package_manager: PackageManagerKind = managers[manager_choice].parse()?;

    let template = match template {
        Some(template) => Some(template),
        None => {
            let templates =
                TemplateDiscovery::list_templates(&super::extra_template_dirs(config))?;
            let mut items = vec!["None (empty project)".to_string()];
            items.extend(
                templates
                    .iter()
                    .map(|t| format!("{} - {}", t.name, t.description)),
            );
            let choice = input.prompt_select("Use a template? (optional)", &items, 0)?;
            if choice > 0 {
                Some(templates[choice - 1].name.clone())
            } else {
                None
            }
        }
    };

    let script_options: Vec<String> = COMMON_SCRIPTS
        .iter()
        .map(|(name, _, desc)| format!("{} - {}", name, desc))
        .collect();
    let script_selections = input.prompt_multiselect(
        "Set up common scripts? (space to select, enter to confirm)",
        &script_options,
    )?;
    let scripts: Vec<(String, String)> = script_selections
        .iter()
        .map(|&i| {
            let (name, command, _) = COMMON_SCRIPTS[i];
            (name.to_string(), command.to_string())
        })
        .collect();

    println!("\n📋 Project Summary:");
    println!("  Name: {}", name);
    println!("  Version: {}", version);
    if !description.is_empty() {
        println!("  Description: {}", description);
    }
    println!("  Package manager: {}", package_manager);
    if let Some(ref template) = template {
        println!("  Template: {}", template);
    }
    if !scripts.is_empty() {
        println!(
            "  Scripts: {}",
            scripts
                .iter()
                .map(|(name, _)| name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    if !input.prompt_confirm("Create project?", true)? {
        return Ok(None);
    }

    Ok(Some(InitAnswers {
        name,
        version,
        description,
        package_manager,
        template,
        scripts,
    }))
}

fn validate_project_name(name: &str) -> TrellisResult<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '@' || c == '/');
    if valid {
        Ok(())
    } else {
        Err(TrellisError::Config(format!(
            "Invalid project name '{}': use alphanumeric characters, hyphens, and underscores",
            name
        )))
    }
}

async fn scaffold(
    container: &ServiceContainer,
    dir: &Path,
    answers: InitAnswers,
) -> TrellisResult<()> {
    let config = container.config();
    let mut manifest = ProjectManifest::create(dir, container.runner())?;

    manifest.set("name", json!(answers.name.clone()));
    manifest.set("version", json!(answers.version.clone()));
    manifest.set("description", json!(answers.description.clone()));
    for (name, command) in &answers.scripts {
        manifest.add_script(name, command);
    }

    let scope = json!({
        "trellisVersion": config.pinned_version(),
        "name": answers.name.clone(),
        "description": answers.description.clone(),
    });

    if let Some(ref template_name) = answers.template {
        let info =
            TemplateDiscovery::find_template(template_name, &super::extra_template_dirs(config))?;
        let renderer = TemplateRenderer::new(info)?;
        let written = renderer.render(dir, &scope)?;
        println!("✓ Rendered {} file(s) from '{}'", written.len(), template_name);

        for (name, version) in &renderer.metadata().dependencies {
            manifest.add_dependency(name, version, &scope);
        }
        for (name, version) in &renderer.metadata().dev_dependencies {
            manifest.add_dev_dependency(name, version, &scope);
        }
    }

    manifest
        .install(&InstallOptions {
            package_manager: answers.package_manager,
            verbose: config.verbose(),
        })
        .await?;

    println!("\n✅ Project '{}' is ready", answers.name);
    println!("\nNext steps:");
    println!("  1. Review package.json");
    println!("  2. Run: trellis run start");

    Ok(())
}
