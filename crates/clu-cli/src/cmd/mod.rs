pub mod check;
pub mod inspect;

use anyhow::Context;
use std::io::Read;
use std::path::Path;

use crate::output::{CliError, OutputMode, render_error};

/// Read a payload from `path`, or from stdin when `path` is `-`.
pub fn read_input(path: &Path, output: OutputMode) -> anyhow::Result<String> {
    let result = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")
            .map(|_| buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    };

    result.inspect_err(|e| {
        let _ = render_error(
            output,
            &CliError::with_details(
                format!("{e:#}"),
                "pass a readable file, or `-` to read from stdin",
                "input_unreadable",
            ),
        );
    })
}

/// Resolve `json`, rendering any resolution error before returning it.
pub fn resolve_payload(
    json: &str,
    config: &clu_core::ResolveConfig,
    output: OutputMode,
) -> anyhow::Result<clu_core::MentionGraph> {
    match clu_core::from_compact_json_with(json, config) {
        Ok(graph) => Ok(graph),
        Err(e) => {
            render_error(output, &CliError::from(&e))?;
            anyhow::bail!("{} ({})", e.code().message(), e.code())
        }
    }
}
