//! Trellis — interactive project scaffolding for Node.js
//!
//! This crate provides the main Trellis library, re-exporting core
//! functionality from `trellis-core` and organizing the modules for
//! manifest management, task orchestration, and template rendering.

pub use trellis_core::{TrellisError, TrellisResult};

/// Core module re-exported from trellis-core.
pub mod core {
    pub use trellis_core::core::*;
    pub use trellis_core::*;

    /// Path module re-exported from trellis-core.
    pub mod path {
        pub use trellis_core::core::path::*;
    }
}

/// Configuration management.
pub mod config;

/// Project manifest model (package.json).
pub mod manifest;

/// Package-manager backends (npm, yarn).
pub mod package_manager;

/// Subprocess execution.
pub mod process;

/// Task orchestration.
pub mod tasks;

/// Template metadata, discovery, and rendering.
pub mod template;

/// Dependency injection infrastructure.
pub mod di;
