//! Compact JSON entry points.

pub mod paths;
pub mod record;
pub mod resolver;

use serde_json::Value;

pub use paths::construct_paths;
pub use record::{CompactJson, MentionRecord, RawArguments};
pub use resolver::resolve;

use crate::config::ResolveConfig;
use crate::error::{Error, Result};
use crate::graph::MentionGraph;

/// Parse and resolve a compact JSON string with default settings.
///
/// # Errors
///
/// [`Error::Malformed`] if `json` is not a compact payload, otherwise any
/// error from [`resolve`].
pub fn from_compact_json(json: &str) -> Result<MentionGraph> {
    from_compact_json_with(json, &ResolveConfig::default())
}

/// [`from_compact_json`] with explicit settings.
///
/// # Errors
///
/// See [`from_compact_json`].
pub fn from_compact_json_with(json: &str, config: &ResolveConfig) -> Result<MentionGraph> {
    let payload: CompactJson = serde_json::from_str(json).map_err(Error::Malformed)?;
    resolve(payload, config)
}

/// Resolve an already parsed JSON value with default settings.
///
/// # Errors
///
/// See [`from_compact_json`].
pub fn from_compact_value(value: Value) -> Result<MentionGraph> {
    from_compact_value_with(value, &ResolveConfig::default())
}

/// [`from_compact_value`] with explicit settings.
///
/// # Errors
///
/// See [`from_compact_json`].
pub fn from_compact_value_with(value: Value, config: &ResolveConfig) -> Result<MentionGraph> {
    let payload: CompactJson = serde_json::from_value(value).map_err(Error::Malformed)?;
    resolve(payload, config)
}
