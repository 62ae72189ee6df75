use super::builtin::{self, BuiltinTemplate};
use super::metadata::TemplateMetadata;
use std::path::{Path, PathBuf};
use tracing::warn;
use trellis_core::core::path::user_templates_dir;
use trellis_core::{TrellisError, TrellisResult};

/// Discovers available templates from built-in and on-disk locations
pub struct TemplateDiscovery;

#[derive(Debug, Clone)]
pub struct TemplateInfo {
    pub name: String,
    pub description: String,
    pub source: TemplateSource,
}

#[derive(Debug, Clone)]
pub enum TemplateSource {
    Builtin(&'static BuiltinTemplate),
    Dir(PathBuf),
}

impl TemplateDiscovery {
    /// List all available templates: user templates first (so they can
    /// shadow built-ins), then any extra configured directories, then
    /// the embedded starters.
    pub fn list_templates(extra_dirs: &[PathBuf]) -> TrellisResult<Vec<TemplateInfo>> {
        let mut templates = Vec::new();

        if let Ok(user_dir) = user_templates_dir() {
            templates.extend(Self::discover_in_dir(&user_dir)?);
        }
        for dir in extra_dirs {
            templates.extend(Self::discover_in_dir(dir)?);
        }

        for builtin in builtin::all() {
            if templates.iter().any(|t| t.name == builtin.name) {
                continue;
            }
            let metadata = TemplateMetadata::parse(builtin.metadata)?;
            templates.push(TemplateInfo {
                name: metadata.name,
                description: metadata.description,
                source: TemplateSource::Builtin(builtin),
            });
        }

        Ok(templates)
    }

    /// Find a template by name, with on-disk templates taking priority
    /// over the embedded starters.
    pub fn find_template(name: &str, extra_dirs: &[PathBuf]) -> TrellisResult<TemplateInfo> {
        let mut search_dirs = Vec::new();
        if let Ok(user_dir) = user_templates_dir() {
            search_dirs.push(user_dir);
        }
        search_dirs.extend(extra_dirs.iter().cloned());

        for dir in &search_dirs {
            let template_path = dir.join(name);
            if template_path.join("template.yaml").exists() {
                let metadata = TemplateMetadata::load(&template_path)?;
                return Ok(TemplateInfo {
                    name: metadata.name,
                    description: metadata.description,
                    source: TemplateSource::Dir(template_path),
                });
            }
        }

        if let Some(builtin) = builtin::find(name) {
            let metadata = TemplateMetadata::parse(builtin.metadata)?;
            return Ok(TemplateInfo {
                name: metadata.name,
                description: metadata.description,
                source: TemplateSource::Builtin(builtin),
            });
        }

        Err(TrellisError::Template(format!(
            "Template '{}' not found",
            name
        )))
    }

    fn discover_in_dir(dir: &Path) -> TrellisResult<Vec<TemplateInfo>> {
        let mut templates = Vec::new();

        if !dir.is_dir() {
            return Ok(templates);
        }

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if !path.is_dir() || !path.join("template.yaml").exists() {
                continue;
            }
            match TemplateMetadata::load(&path) {
                Ok(metadata) => {
                    templates.push(TemplateInfo {
                        name: metadata.name,
                        description: metadata.description,
                        source: TemplateSource::Dir(path),
                    });
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load template metadata");
                }
            }
        }

        Ok(templates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_list_includes_builtins() {
        let templates = TemplateDiscovery::list_templates(&[]).unwrap();
        assert!(templates.iter().any(|t| t.name == "node-app"));
        assert!(templates.iter().any(|t| t.name == "express-api"));
    }

    #[test]
    fn test_discover_in_dir() {
        let temp = TempDir::new().unwrap();
        let template_dir = temp.path().join("my-template");
        fs::create_dir_all(&template_dir).unwrap();
        fs::write(
            template_dir.join("template.yaml"),
            "name: my-template\ndescription: Local template\n",
        )
        .unwrap();

        let templates = TemplateDiscovery::discover_in_dir(temp.path()).unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, "my-template");
    }

    #[test]
    fn test_discover_in_dir_skips_plain_dirs() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("no-metadata")).unwrap();

        let templates = TemplateDiscovery::discover_in_dir(temp.path()).unwrap();
        assert!(templates.is_empty());
    }

    #[test]
    fn test_find_template_prefers_disk_over_builtin() {
        let temp = TempDir::new().unwrap();
        let shadow = temp.path().join("express-api");
        fs::create_dir_all(&shadow).unwrap();
        fs::write(
            shadow.join("template.yaml"),
            "name: express-api\ndescription: Shadowed\n",
        )
        .unwrap();

        let info =
            TemplateDiscovery::find_template("express-api", &[temp.path().to_path_buf()]).unwrap();
        assert_eq!(info.description, "Shadowed");
        assert!(matches!(info.source, TemplateSource::Dir(_)));
    }

    #[test]
    fn test_find_template_falls_back_to_builtin() {
        let info = TemplateDiscovery::find_template("node-app", &[]).unwrap();
        assert!(matches!(info.source, TemplateSource::Builtin(_)));
    }

    #[test]
    fn test_find_template_unknown() {
        let result = TemplateDiscovery::find_template("does-not-exist", &[]);
        assert!(result.is_err());
    }
}
