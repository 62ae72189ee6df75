use crate::di::ConfigProvider;
use serde::{Deserialize, Serialize};
use std::fs;
use trellis_core::core::path::{config_file, ensure_dir};
use trellis_core::{TrellisError, TrellisResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Preferred package manager for install cycles: "yarn" or "npm".
    /// Yarn is probed before use and silently downgraded to npm when the
    /// probe fails.
    #[serde(default = "default_package_manager")]
    pub package_manager: String,

    /// Whether package-manager invocations echo their full output
    #[serde(default)]
    pub verbose: bool,

    /// Additional template search directories (checked after the user
    /// templates directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dirs: Option<Vec<String>>,

    /// Version substituted for `{{trellisVersion}}` in generated
    /// manifests. Defaults to this CLI's own version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned_version: Option<String>,
}

fn default_package_manager() -> String {
    "yarn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package_manager: default_package_manager(),
            verbose: false,
            template_dirs: None,
            pinned_version: None,
        }
    }
}

impl Config {
    /// Load config from the platform config directory, creating the
    /// default file if it doesn't exist
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\trellis\config.yaml
    /// - Linux: ~/.config/trellis/config.yaml
    /// - macOS: ~/Library/Application Support/trellis/config.yaml
    pub fn load() -> TrellisResult<Self> {
        let config_path = config_file()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| TrellisError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save config to the platform config directory
    pub fn save(&self) -> TrellisResult<()> {
        let config_path = config_file()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| TrellisError::Path("Invalid config path".to_string()))?;

        ensure_dir(config_dir)?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| TrellisError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)?;
        Ok(())
    }
}

// Implement ConfigProvider trait
impl ConfigProvider for Config {
    fn package_manager(&self) -> &str {
        &self.package_manager
    }

    fn verbose(&self) -> bool {
        self.verbose
    }

    fn template_dirs(&self) -> Option<&Vec<String>> {
        self.template_dirs.as_ref()
    }

    fn pinned_version(&self) -> String {
        self.pinned_version
            .clone()
            .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string())
    }
}
