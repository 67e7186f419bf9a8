//! `clu check`: resolve a payload and report what it contains.

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use clap::Args;
use clu_core::{MentionGraph, MentionKind, MentionOps, ResolveConfig};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Compact JSON file, or `-` for stdin.
    pub input: PathBuf,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CheckReport {
    pub documents: usize,
    /// Top-level mentions.
    pub roots: usize,
    /// Every mention in the graph, helpers included.
    pub mentions: usize,
    /// Top-level mentions per `type`.
    pub by_type: BTreeMap<String, usize>,
}

impl CheckReport {
    pub fn from_graph(graph: &MentionGraph) -> Self {
        let mut by_type: BTreeMap<String, usize> = MentionKind::ALL
            .iter()
            .map(|kind| (kind.as_str().to_owned(), 0))
            .collect();
        for mention in graph.mentions() {
            *by_type.entry(mention.kind().as_str().to_owned()).or_default() += 1;
        }
        Self {
            documents: graph.documents().len(),
            roots: graph.len(),
            mentions: graph.node_count(),
            by_type,
        }
    }
}

pub fn run_check(
    args: &CheckArgs,
    config: &ResolveConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let json = super::read_input(&args.input, output)?;
    let graph = super::resolve_payload(&json, config, output)?;
    tracing::debug!(roots = graph.len(), "payload resolved");

    let report = CheckReport::from_graph(&graph);
    render_mode(output, &report, |report, w| {
        pretty_section(w, &format!("ok: {}", args.input.display()))?;
        pretty_kv(w, "documents", report.documents.to_string())?;
        pretty_kv(w, "roots", report.roots.to_string())?;
        pretty_kv(w, "mentions", report.mentions.to_string())?;
        for (kind, count) in &report.by_type {
            pretty_kv(w, kind, count.to_string())?;
        }
        Ok(())
    })
}
