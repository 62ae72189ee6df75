use crate::di::traits::{CommandOutput, ProcessRunner};
use crate::manifest::partition;
use crate::package_manager::{self, PackageManagerKind};
use crate::tasks::{Task, TaskList, TaskOptions};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};
use trellis_core::core::path::{find_package_json, resolve_node_module};
use trellis_core::{interpolate, TrellisError, TrellisResult};

/// Keys whose mutation invalidates the installed dependency tree.
const REINSTALL_KEYS: [&str; 3] = ["dependencies", "devDependencies", "peerDependencies"];

/// Options for an install cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    pub package_manager: PackageManagerKind,
    pub verbose: bool,
}

/// The project's package.json, held as one ordered field bag with typed
/// accessors layered on top.
///
/// Two dirty flags track pending state: `rewrite` (on-disk content is
/// stale) and `reinstall` (the installed dependency tree is stale). They
/// are atomics so the read-only tasks of an install pipeline can clear
/// them as each step completes.
pub struct ProjectManifest {
    root_dir: PathBuf,
    fields: Map<String, Value>,
    rewrite: AtomicBool,
    reinstall: AtomicBool,
    initializing: bool,
    runner: Arc<dyn ProcessRunner>,
}

impl ProjectManifest {
    /// Load the manifest of an existing project rooted at (or above)
    /// `root_dir`.
    pub fn load(root_dir: &Path, runner: Arc<dyn ProcessRunner>) -> TrellisResult<Self> {
        Self::with_mode(root_dir, false, runner)
    }

    /// Load or create the manifest of a project being initialized. When
    /// no manifest file exists yet, the default shape is used; a parent
    /// project's manifest is never adopted.
    pub fn create(root_dir: &Path, runner: Arc<dyn ProcessRunner>) -> TrellisResult<Self> {
        Self::with_mode(root_dir, true, runner)
    }

    fn with_mode(
        root_dir: &Path,
        initializing: bool,
        runner: Arc<dyn ProcessRunner>,
    ) -> TrellisResult<Self> {
        let mut manifest = Self {
            root_dir: root_dir.to_path_buf(),
            fields: Map::new(),
            rewrite: AtomicBool::new(false),
            reinstall: AtomicBool::new(false),
            initializing,
            runner,
        };
        manifest.read()?;
        Ok(manifest)
    }

    fn default_fields(root_dir: &Path) -> Map<String, Value> {
        let name = root_dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("project")
            .to_string();

        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(name));
        fields.insert("version".to_string(), Value::String("1.0.0".to_string()));
        fields.insert("description".to_string(), Value::String(String::new()));
        fields.insert("scripts".to_string(), Value::Object(Map::new()));
        fields.insert("dependencies".to_string(), Value::Object(Map::new()));
        fields.insert("devDependencies".to_string(), Value::Object(Map::new()));
        fields
    }

    /// Discard in-memory state and reload from disk.
    ///
    /// Happens on construction, on root-directory change, and at the end
    /// of a successful install cycle. When the manifest file is found
    /// above the configured root, the tracked root moves to the
    /// manifest's directory.
    pub fn read(&mut self) -> TrellisResult<()> {
        let found = if self.initializing {
            let candidate = self.root_dir.join("package.json");
            candidate.is_file().then_some(candidate)
        } else {
            find_package_json(&self.root_dir)
        };

        let mut fields = Self::default_fields(&self.root_dir);

        if let Some(manifest_path) = found {
            if let Some(dir) = manifest_path.parent() {
                if dir != self.root_dir {
                    debug!(root = %dir.display(), "manifest found above configured root, retargeting");
                    self.root_dir = dir.to_path_buf();
                }
            }

            let content = fs::read_to_string(&manifest_path)?;
            let value: Value = serde_json::from_str(&content)?;
            let Value::Object(read_fields) = value else {
                return Err(TrellisError::Manifest(format!(
                    "{} does not contain a JSON object",
                    manifest_path.display()
                )));
            };
            for (key, value) in read_fields {
                fields.insert(key, value);
            }
        }

        self.fields = fields;
        self.rewrite.store(false, Ordering::SeqCst);
        self.reinstall.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Retarget the project root and reload the manifest from there.
    pub fn change_root(&mut self, root_dir: &Path) -> TrellisResult<()> {
        self.root_dir = root_dir.to_path_buf();
        self.read()
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn package_json_path(&self) -> PathBuf {
        self.root_dir.join("package.json")
    }

    pub fn runner(&self) -> Arc<dyn ProcessRunner> {
        self.runner.clone()
    }

    /// Whether on-disk content is stale and needs a write.
    pub fn rewrite(&self) -> bool {
        self.rewrite.load(Ordering::SeqCst)
    }

    /// Whether the installed dependency tree is stale and needs a bulk
    /// install.
    pub fn reinstall(&self) -> bool {
        self.reinstall.load(Ordering::SeqCst)
    }

    /// Mark the installed tree stale so the next cycle reruns the bulk
    /// install even without a manifest mutation.
    pub fn mark_reinstall(&self) {
        self.reinstall.store(true, Ordering::SeqCst);
    }

    pub fn name(&self) -> &str {
        self.str_field("name")
    }

    pub fn version(&self) -> &str {
        self.str_field("version")
    }

    pub fn description(&self) -> &str {
        self.str_field("description")
    }

    fn str_field(&self, key: &str) -> &str {
        self.fields.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    fn object_field(&self, key: &str) -> Map<String, Value> {
        match self.fields.get(key) {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        }
    }

    pub fn scripts(&self) -> Map<String, Value> {
        self.object_field("scripts")
    }

    pub fn dependencies(&self) -> Map<String, Value> {
        self.object_field("dependencies")
    }

    pub fn dev_dependencies(&self) -> Map<String, Value> {
        self.object_field("devDependencies")
    }

    /// Union of runtime and dev dependencies. devDependencies is merged
    /// second, so its entries win on key collision (intentional,
    /// preserved behavior).
    pub fn all_dependencies(&self) -> Map<String, Value> {
        let mut all = self.dependencies();
        for (name, spec) in self.dev_dependencies() {
            all.insert(name, spec);
        }
        all
    }

    /// Set a runtime dependency. The version passes through `{{token}}`
    /// interpolation against `scope` first.
    pub fn add_dependency(&mut self, name: &str, version: &str, scope: &Value) {
        let version = resolve_version(version, scope);
        self.insert_entry("dependencies", name, Value::String(version));
        self.reinstall.store(true, Ordering::SeqCst);
        self.rewrite.store(true, Ordering::SeqCst);
    }

    /// Set a dev dependency. Same interpolation rules as
    /// [`add_dependency`](Self::add_dependency).
    pub fn add_dev_dependency(&mut self, name: &str, version: &str, scope: &Value) {
        let version = resolve_version(version, scope);
        self.insert_entry("devDependencies", name, Value::String(version));
        self.reinstall.store(true, Ordering::SeqCst);
        self.rewrite.store(true, Ordering::SeqCst);
    }

    pub fn add_script(&mut self, name: &str, command: &str) {
        self.insert_entry("scripts", name, Value::String(command.to_string()));
        self.rewrite.store(true, Ordering::SeqCst);
    }

    fn insert_entry(&mut self, field: &str, name: &str, value: Value) {
        let entry = self
            .fields
            .entry(field.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(map) = entry {
            map.insert(name.to_string(), value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set a top-level field. Touching a dependency map also invalidates
    /// the installed tree.
    pub fn set(&mut self, key: &str, value: Value) {
        if REINSTALL_KEYS.contains(&key) {
            self.reinstall.store(true, Ordering::SeqCst);
        }
        self.fields.insert(key.to_string(), value);
        self.rewrite.store(true, Ordering::SeqCst);
    }

    /// Merge `value` into an existing object field (top-level keys only).
    /// Degenerates to [`set`](Self::set) when either side is not an
    /// object.
    pub fn add(&mut self, key: &str, value: Value) {
        match (self.fields.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                for (k, v) in incoming {
                    existing.insert(k, v);
                }
                if REINSTALL_KEYS.contains(&key) {
                    self.reinstall.store(true, Ordering::SeqCst);
                }
                self.rewrite.store(true, Ordering::SeqCst);
            }
            (_, value) => self.set(key, value),
        }
    }

    /// Persist the manifest: dependency maps sorted by key, placeholder
    /// versions dropped, pretty-printed JSON with 2-space indent.
    pub fn write(&self) -> TrellisResult<()> {
        let mut fields = self.fields.clone();

        for key in ["dependencies", "devDependencies"] {
            if let Some(Value::Object(deps)) = fields.get(key) {
                let kept: Map<String, Value> = partition::partition_valid(deps)
                    .into_iter()
                    .map(|(name, spec)| (name, Value::String(spec)))
                    .collect();
                fields.insert(key.to_string(), Value::Object(kept));
            }
        }

        let mut content = serde_json::to_string_pretty(&Value::Object(fields))?;
        content.push('\n');
        fs::write(self.package_json_path(), content)?;

        self.rewrite.store(false, Ordering::SeqCst);
        debug!(path = %self.package_json_path().display(), "manifest written");
        Ok(())
    }

    /// Reconcile the manifest with the installed dependency tree.
    ///
    /// Builds the sequential pipeline (write, bulk install, add
    /// placeholder runtime deps, add placeholder dev deps), runs it, then
    /// clears both dirty flags and re-reads the manifest from disk.
    pub async fn install(&mut self, options: &InstallOptions) -> TrellisResult<()> {
        let backend =
            package_manager::select_backend(options.package_manager, self.runner.as_ref());
        info!(
            backend = backend.program(),
            root = %self.root_dir.display(),
            "reconciling project manifest"
        );

        let mut pipeline = TaskList::new(TaskOptions {
            concurrent: false,
            exit_on_error: true,
        });
        pipeline.push(
            Task::new("Write package.json", |m: &ProjectManifest| {
                let result = m.write();
                async move { result }
            })
            .skip_if(|m: &ProjectManifest| {
                (!m.rewrite()).then(|| "package.json is up to date".to_string())
            }),
        );
        for task in package_manager::build_install_tasks(backend, options.verbose) {
            pipeline.push(task);
        }

        pipeline.run(self).await?;

        self.rewrite.store(false, Ordering::SeqCst);
        self.reinstall.store(false, Ordering::SeqCst);
        self.read()
    }

    /// Run a manifest script through the package manager's script
    /// runner. With `ignore_error` a failure is swallowed and the caller
    /// observes an empty, successful result.
    pub async fn run_script(
        &self,
        name: &str,
        ignore_error: bool,
        options: &InstallOptions,
    ) -> TrellisResult<CommandOutput> {
        let backend =
            package_manager::select_backend(options.package_manager, self.runner.as_ref());
        debug!(script = name, backend = backend.program(), "running manifest script");

        match self
            .runner
            .run(
                backend.program(),
                &backend.run_script_args(name),
                &self.root_dir,
                options.verbose,
            )
            .await
        {
            Ok(output) => Ok(output),
            Err(e) if ignore_error => {
                debug!(script = name, error = %e, "script failed, ignoring");
                Ok(CommandOutput::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Resolve a module under node_modules and load its package.json.
    /// Used to read project-local configuration at runtime.
    pub fn import_module(&self, name: &str) -> TrellisResult<Value> {
        let module_dir = resolve_node_module(&self.root_dir, name)?;
        let content = fs::read_to_string(module_dir.join("package.json"))?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Resolve a declared version through the interpolation scope. The
/// distinguished `{{trellisVersion}}` pin substitutes before the generic
/// pass runs.
fn resolve_version(version: &str, scope: &Value) -> String {
    let version = match scope.get("trellisVersion").and_then(Value::as_str) {
        Some(pin) => version.replace("{{trellisVersion}}", pin),
        None => version.to_string(),
    };
    interpolate(&version, scope)
}
