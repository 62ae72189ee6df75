use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use trellis_core::{TrellisError, TrellisResult};

/// Template metadata stored in template.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateMetadata {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub variables: Vec<TemplateVariable>,
    /// Dependencies the rendered project expects in its manifest.
    /// Version strings may use `{{token}}` placeholders.
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateVariable {
    pub name: String,
    pub description: Option<String>,
    pub default: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl TemplateMetadata {
    pub fn load(template_dir: &Path) -> TrellisResult<Self> {
        let metadata_path = template_dir.join("template.yaml");
        if !metadata_path.exists() {
            return Err(TrellisError::Template(format!(
                "Template metadata not found: {}",
                metadata_path.display()
            )));
        }

        let content = std::fs::read_to_string(&metadata_path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> TrellisResult<Self> {
        let metadata: TemplateMetadata = serde_yaml::from_str(content)?;
        Ok(metadata)
    }
}
