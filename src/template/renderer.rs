use super::discovery::{TemplateInfo, TemplateSource};
use super::metadata::TemplateMetadata;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use trellis_core::{interpolate, TrellisError, TrellisResult};
use walkdir::WalkDir;

/// Renders a template into a target directory.
///
/// File contents and file names both pass through `{{token}}`
/// interpolation against the provided scope; variable defaults from the
/// template metadata fill in for anything the caller left out.
pub struct TemplateRenderer {
    template: TemplateInfo,
    metadata: TemplateMetadata,
}

impl TemplateRenderer {
    pub fn new(template: TemplateInfo) -> TrellisResult<Self> {
        let metadata = match &template.source {
            TemplateSource::Builtin(builtin) => TemplateMetadata::parse(builtin.metadata)?,
            TemplateSource::Dir(path) => TemplateMetadata::load(path)?,
        };
        Ok(Self { template, metadata })
    }

    pub fn metadata(&self) -> &TemplateMetadata {
        &self.metadata
    }

    /// Render every template file into `target_dir`, returning the paths
    /// written.
    pub fn render(&self, target_dir: &Path, scope: &Value) -> TrellisResult<Vec<PathBuf>> {
        for variable in &self.metadata.variables {
            if variable.required
                && variable.default.is_none()
                && scope.get(&variable.name).is_none()
            {
                return Err(TrellisError::Template(format!(
                    "Required template variable '{}' not provided",
                    variable.name
                )));
            }
        }

        let scope = self.scope_with_defaults(scope);
        fs::create_dir_all(target_dir)?;

        let mut written = Vec::new();
        for (relative, content) in self.files()? {
            let rendered_path = interpolate(&relative, &scope);
            let target_path = target_dir.join(&rendered_path);
            if let Some(parent) = target_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target_path, interpolate(&content, &scope))?;
            debug!(path = %target_path.display(), "rendered template file");
            written.push(target_path);
        }

        Ok(written)
    }

    /// Metadata defaults fill any top-level key the caller's scope does
    /// not provide.
    fn scope_with_defaults(&self, scope: &Value) -> Value {
        let mut merged = match scope {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };
        for variable in &self.metadata.variables {
            if merged.contains_key(&variable.name) {
                continue;
            }
            if let Some(default) = &variable.default {
                merged.insert(variable.name.clone(), Value::String(default.clone()));
            }
        }
        Value::Object(merged)
    }

    fn files(&self) -> TrellisResult<Vec<(String, String)>> {
        match &self.template.source {
            TemplateSource::Builtin(builtin) => Ok(builtin
                .files
                .iter()
                .map(|(path, content)| (path.to_string(), content.to_string()))
                .collect()),
            TemplateSource::Dir(template_dir) => {
                let mut files = Vec::new();
                for entry in WalkDir::new(template_dir).into_iter().filter_map(|e| e.ok()) {
                    let path = entry.path();
                    if !path.is_file() {
                        continue;
                    }
                    let relative = path
                        .strip_prefix(template_dir)
                        .map_err(|e| TrellisError::Path(e.to_string()))?;
                    if relative == Path::new("template.yaml") {
                        continue;
                    }
                    files.push((
                        relative.to_string_lossy().into_owned(),
                        fs::read_to_string(path)?,
                    ));
                }
                Ok(files)
            }
        }
    }
}
