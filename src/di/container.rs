//! Service container for dependency injection

use super::traits::{ConfigProvider, ProcessRunner};
use crate::config::Config;
use crate::process::SystemProcessRunner;
use std::sync::Arc;
use trellis_core::TrellisResult;

/// Service container for dependency injection
///
/// Holds the collaborators the manifest and CLI layers consume and
/// provides access through trait objects. `Arc<dyn Trait>` keeps runtime
/// polymorphism cheap (one vtable lookup per call, negligible next to the
/// subprocess and disk I/O behind it) and lets tests swap in mocks.
#[derive(Clone)]
pub struct ServiceContainer {
    pub config: Arc<dyn ConfigProvider>,
    pub runner: Arc<dyn ProcessRunner>,
}

impl ServiceContainer {
    /// Create a new service container with production implementations
    ///
    /// Loads config from disk (creating the default file on first run)
    /// and wires the real subprocess runner.
    pub fn new() -> TrellisResult<Self> {
        let config = Config::load()?;

        Ok(Self {
            config: Arc::new(config),
            runner: Arc::new(SystemProcessRunner),
        })
    }

    /// Create a service container with custom provider implementations
    ///
    /// Primarily useful for testing, where mock implementations of each
    /// collaborator can be injected.
    pub fn with_providers(
        config: Arc<dyn ConfigProvider>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self { config, runner }
    }

    /// Get the configuration provider
    pub fn config(&self) -> &dyn ConfigProvider {
        self.config.as_ref()
    }

    /// Get the subprocess runner
    pub fn runner(&self) -> Arc<dyn ProcessRunner> {
        self.runner.clone()
    }
}
