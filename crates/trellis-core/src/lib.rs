//! Core utilities for Trellis.
//!
//! This crate holds the pieces shared by the CLI and by anything that
//! embeds it as a library: the error type, project-path discovery,
//! npm-grammar version parsing, and `{{token}}` interpolation.

pub mod core;

pub use crate::core::error::{TrellisError, TrellisResult};
pub use crate::core::interpolate::interpolate;
pub use crate::core::semver::{is_valid_spec, Version, VersionReq};
