use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Knobs for [`resolve`](crate::resolve).
///
/// ```toml
/// text_bound_first = true
/// synthesize_missing_arguments = true
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Resolve top-level text-bound mentions before everything else, so
    /// event triggers are reused instead of rebuilt from inline records.
    #[serde(default = "default_true")]
    pub text_bound_first: bool,
    /// Append argument records that are missing from the top-level list
    /// instead of failing with a missing-mention error.
    #[serde(default = "default_true")]
    pub synthesize_missing_arguments: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            text_bound_first: default_true(),
            synthesize_missing_arguments: default_true(),
        }
    }
}

impl ResolveConfig {
    /// Defaults with self-healing turned off.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            synthesize_missing_arguments: false,
            ..Self::default()
        }
    }
}

/// Read a [`ResolveConfig`] from a TOML file, or defaults if it does not
/// exist.
///
/// # Errors
///
/// Fails if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<ResolveConfig> {
    if !path.exists() {
        return Ok(ResolveConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ResolveConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = load_config(&dir.path().join("absent.toml")).expect("defaults");
        assert_eq!(config, ResolveConfig::default());
        assert!(config.text_bound_first);
        assert!(config.synthesize_missing_arguments);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("clu.toml");
        std::fs::write(&path, "synthesize_missing_arguments = false\n").expect("write config");

        let config = load_config(&path).expect("valid config");
        assert_eq!(config, ResolveConfig::strict());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("clu.toml");
        std::fs::write(&path, "text_bound_first = \"yes\"\n").expect("write config");

        let err = load_config(&path).expect_err("wrong value type");
        assert!(format!("{err:#}").contains("clu.toml"));
    }
}
