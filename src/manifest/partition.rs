//! Version partitioning
//!
//! Declared dependency versions come in two kinds: resolvable semver
//! specs that can be persisted as-is, and placeholders (dist-tags,
//! unsubstituted tokens) that must be handed to the package manager as
//! install targets. The two partitions are disjoint and together cover
//! the input exactly; they are recomputed fresh on every install or
//! write cycle because the manifest may have changed in between.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use trellis_core::is_valid_spec;

/// The resolvable subset: entries whose version parses as a valid
/// semantic version or range, unchanged but sorted by key to match the
/// order in which they are persisted.
pub fn partition_valid(deps: &Map<String, Value>) -> BTreeMap<String, String> {
    deps.iter()
        .filter(|(_, spec)| is_valid_entry(spec))
        .map(|(name, spec)| (name.clone(), spec_text(spec)))
        .collect()
}

/// Install targets for the complement set, in declaration order:
/// `name` when the version is exactly `"latest"`, else `name@version`.
pub fn partition_invalid(deps: &Map<String, Value>) -> Vec<String> {
    deps.iter()
        .filter(|(_, spec)| !is_valid_entry(spec))
        .map(|(name, spec)| {
            let spec = spec_text(spec);
            if spec == "latest" {
                name.clone()
            } else {
                format!("{}@{}", name, spec)
            }
        })
        .collect()
}

fn is_valid_entry(spec: &Value) -> bool {
    spec.as_str().is_some_and(is_valid_spec)
}

fn spec_text(spec: &Value) -> String {
    match spec {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
