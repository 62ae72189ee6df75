use crate::core::error::{TrellisError, TrellisResult};
use std::path::{Path, PathBuf};

/// Get the Trellis home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\trellis
/// - Linux: ~/.config/trellis
/// - macOS: ~/Library/Application Support/trellis
pub fn trellis_home() -> TrellisResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| TrellisError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("trellis"))
}

/// Get the config file path
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\trellis\config.yaml
/// - Linux: ~/.config/trellis/config.yaml
/// - macOS: ~/Library/Application Support/trellis/config.yaml
pub fn config_file() -> TrellisResult<PathBuf> {
    Ok(trellis_home()?.join("config.yaml"))
}

/// Get the user templates directory (~/.config/trellis/templates)
pub fn user_templates_dir() -> TrellisResult<PathBuf> {
    Ok(trellis_home()?.join("templates"))
}

/// Get the node_modules directory for a project
pub fn node_modules_dir(project_root: &Path) -> PathBuf {
    project_root.join("node_modules")
}

/// Find the nearest package.json at `start` or any ancestor directory.
///
/// Returns the path to the manifest file itself. This is the lookup the
/// manifest model uses to retarget the project root when invoked from a
/// subdirectory of an existing project.
pub fn find_package_json(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let manifest = current.join("package.json");
        if manifest.is_file() {
            return Some(manifest);
        }

        if let Some(parent) = current.parent() {
            current = parent.to_path_buf();
        } else {
            return None;
        }
    }
}

/// Resolve a module directory by name, Node-style: check
/// `node_modules/<name>` at `start` and every ancestor.
pub fn resolve_node_module(start: &Path, name: &str) -> TrellisResult<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let candidate = node_modules_dir(&current).join(name);
        if candidate.is_dir() {
            return Ok(candidate);
        }

        if let Some(parent) = current.parent() {
            current = parent.to_path_buf();
        } else {
            return Err(TrellisError::Package(format!(
                "Could not resolve module '{}' from {}",
                name,
                start.display()
            )));
        }
    }
}

/// Check if we're in a project root (package.json exists)
pub fn is_project_root(dir: &Path) -> bool {
    dir.join("package.json").exists()
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> TrellisResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_package_json_in_parent() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join("project");
        let nested = project_dir.join("src").join("controllers");
        fs::create_dir_all(&nested).unwrap();
        fs::write(project_dir.join("package.json"), "{\"name\":\"test\"}").unwrap();

        let found = find_package_json(&nested).unwrap();
        assert_eq!(found, project_dir.join("package.json"));
    }

    #[test]
    fn test_find_package_json_stops_at_nearest() {
        let temp = TempDir::new().unwrap();
        let outer = temp.path().join("outer");
        let inner = outer.join("inner");
        fs::create_dir_all(&inner).unwrap();
        fs::write(outer.join("package.json"), "{\"name\":\"outer\"}").unwrap();
        fs::write(inner.join("package.json"), "{\"name\":\"inner\"}").unwrap();

        let found = find_package_json(&inner).unwrap();
        assert_eq!(found, inner.join("package.json"));
    }

    #[test]
    fn test_resolve_node_module() {
        let temp = TempDir::new().unwrap();
        let module_dir = temp.path().join("node_modules").join("left-pad");
        fs::create_dir_all(&module_dir).unwrap();

        let nested = temp.path().join("src");
        fs::create_dir_all(&nested).unwrap();

        let resolved = resolve_node_module(&nested, "left-pad").unwrap();
        assert_eq!(resolved, module_dir);
    }

    #[test]
    fn test_resolve_node_module_missing() {
        let temp = TempDir::new().unwrap();
        let result = resolve_node_module(temp.path(), "no-such-module");
        assert!(result.is_err());
    }

    #[test]
    fn test_ensure_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("test_dir");

        ensure_dir(&dir).unwrap();
        assert!(dir.exists());
        assert!(dir.is_dir());
    }

    #[test]
    fn test_is_project_root() {
        let temp = TempDir::new().unwrap();
        assert!(!is_project_root(temp.path()));

        fs::write(temp.path().join("package.json"), "{}").unwrap();
        assert!(is_project_root(temp.path()));
    }
}
