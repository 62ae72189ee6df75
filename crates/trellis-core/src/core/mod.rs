pub mod error;
pub mod interpolate;
pub mod path;
pub mod semver;

pub use error::{TrellisError, TrellisResult};
