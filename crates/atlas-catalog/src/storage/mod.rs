//! Catalog persistence
//!
//! A [`PatternStorage`] is the narrow boundary between the repository and a
//! durable store: it accepts patterns on `save` and hands back raw records on
//! `load`. Records coming back are untrusted and go through the loader.

mod file;
mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;
use crate::pattern::Pattern;
use std::sync::Arc;

/// Storage backend for catalog patterns
pub trait PatternStorage {
    /// Replace the stored catalog with `patterns`
    fn save(&self, patterns: &[Arc<Pattern>]) -> Result<()>;

    /// Load the stored raw records (empty when nothing was saved)
    fn load(&self) -> Result<Vec<serde_json::Value>>;

    /// Whether anything has been saved
    fn exists(&self) -> bool;

    /// Remove the stored catalog
    fn clear(&self) -> Result<()>;
}

fn to_records(patterns: &[Arc<Pattern>]) -> Result<Vec<serde_json::Value>> {
    patterns
        .iter()
        .map(|p| serde_json::to_value(p.as_ref()))
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| crate::Error::Serialization(e.to_string()))
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
