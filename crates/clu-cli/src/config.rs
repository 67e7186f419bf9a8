//! Locate and load the resolver configuration.
//!
//! Precedence (highest wins):
//! 1. `--config <path>` (must exist)
//! 2. `./clu.toml`
//! 3. `<config dir>/clu/config.toml`
//! 4. built-in defaults

use anyhow::Context;
use clu_core::{ResolveConfig, load_config};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG: &str = "clu.toml";

fn candidate_paths(
    flag: Option<&Path>,
    cwd: &Path,
    config_dir: Option<&Path>,
) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = flag {
        anyhow::ensure!(path.exists(), "config file {} does not exist", path.display());
        return Ok(Some(path.to_path_buf()));
    }

    let local = cwd.join(LOCAL_CONFIG);
    if local.exists() {
        return Ok(Some(local));
    }

    Ok(config_dir
        .map(|dir| dir.join("clu/config.toml"))
        .filter(|path| path.exists()))
}

fn resolve_config_inner(
    flag: Option<&Path>,
    cwd: &Path,
    config_dir: Option<&Path>,
) -> anyhow::Result<ResolveConfig> {
    match candidate_paths(flag, cwd, config_dir)? {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            load_config(&path)
        }
        None => Ok(ResolveConfig::default()),
    }
}

/// Resolve the effective config for this invocation.
pub fn resolve_config(flag: Option<&Path>) -> anyhow::Result<ResolveConfig> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let config_dir = dirs::config_dir();
    resolve_config_inner(flag, &cwd, config_dir.as_deref())
}
