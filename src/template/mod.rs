//! Template black box
//!
//! A template is a set of files whose contents and file names pass
//! through `{{token}}` interpolation, plus `template.yaml` metadata
//! describing variables and the dependencies the rendered project
//! expects. Starter templates ship embedded in the binary; user
//! templates are discovered on disk.

pub mod builtin;
pub mod discovery;
pub mod metadata;
pub mod renderer;

pub use discovery::{TemplateDiscovery, TemplateInfo, TemplateSource};
pub use metadata::{TemplateMetadata, TemplateVariable};
pub use renderer::TemplateRenderer;
