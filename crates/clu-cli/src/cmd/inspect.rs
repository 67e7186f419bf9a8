//! `clu inspect`: list resolved mentions.
//!
//! Human output is one tab-separated line per top-level mention:
//! `id  type  labels  sentence  start..end  text`.

use crate::output::{CliError, OutputMode, pretty_kv, pretty_section, render_error, render_mode};
use clap::Args;
use clu_core::{MentionGraph, MentionSnapshot, ResolveConfig};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Compact JSON file, or `-` for stdin.
    pub input: PathBuf,

    /// Show a single mention (top-level or helper) by id.
    #[arg(long)]
    pub id: Option<String>,
}

fn root_snapshots(graph: &MentionGraph) -> Vec<MentionSnapshot> {
    graph
        .roots()
        .iter()
        .filter_map(|&mid| graph.snapshot_of(mid))
        .collect()
}

fn write_row(w: &mut dyn Write, snap: &MentionSnapshot) -> io::Result<()> {
    writeln!(
        w,
        "{}\t{}\t{}\t{}\t{}..{}\t{}",
        snap.id,
        snap.kind,
        snap.labels.join(","),
        snap.sentence,
        snap.token_interval.start,
        snap.token_interval.end,
        snap.text.as_deref().unwrap_or("")
    )
}

fn write_detail(w: &mut dyn Write, snap: &MentionSnapshot) -> io::Result<()> {
    pretty_section(w, &format!("{} ({})", snap.id, snap.kind))?;
    pretty_kv(w, "labels", snap.labels.join(", "))?;
    pretty_kv(
        w,
        "tokens",
        format!("{}..{}", snap.token_interval.start, snap.token_interval.end),
    )?;
    pretty_kv(w, "sentence", snap.sentence.to_string())?;
    if let Some(doc) = &snap.document {
        pretty_kv(w, "document", doc)?;
    }
    pretty_kv(w, "keep", snap.keep.to_string())?;
    pretty_kv(w, "found by", &snap.found_by)?;
    if let Some(text) = &snap.text {
        pretty_kv(w, "text", text)?;
    }
    if let Some(trigger) = &snap.trigger {
        pretty_kv(w, "trigger", trigger)?;
    }
    if let Some(arguments) = &snap.arguments {
        for (role, ids) in arguments {
            pretty_kv(w, &format!("arg {role}"), ids.join(", "))?;
        }
    }
    if let Some(anchor) = &snap.anchor {
        pretty_kv(w, "anchor", anchor)?;
    }
    if let Some(neighbor) = &snap.neighbor {
        pretty_kv(w, "neighbor", neighbor)?;
    }
    Ok(())
}

pub fn run_inspect(
    args: &InspectArgs,
    config: &ResolveConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let json = super::read_input(&args.input, output)?;
    let graph = super::resolve_payload(&json, config, output)?;

    let Some(id) = &args.id else {
        let snapshots = root_snapshots(&graph);
        return render_mode(output, &snapshots, |snapshots, w| {
            for snap in snapshots {
                write_row(w, snap)?;
            }
            Ok(())
        });
    };

    let Some(snap) = graph.find(id).and_then(|mid| graph.snapshot_of(mid)) else {
        render_error(
            output,
            &CliError::with_details(
                format!("mention '{id}' not found"),
                "run `clu inspect <FILE>` to list top-level ids",
                "mention_not_found",
            ),
        )?;
        anyhow::bail!("mention '{id}' not found");
    };
    render_mode(output, &snap, |snap, w| write_detail(w, snap))
}
