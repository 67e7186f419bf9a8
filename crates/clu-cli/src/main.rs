#![forbid(unsafe_code)]

mod cmd;
mod config;
mod output;

use clap::{Parser, Subcommand};
use output::OutputMode;
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "clu: check and inspect compact mention-graph exports",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Resolver config file (TOML). Defaults to ./clu.toml, then the user config dir.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    const fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Resolve a payload and report counts",
        long_about = "Resolve a compact mention JSON payload and report document, mention and per-type counts. Exits non-zero with an error code on the first resolution error.",
        after_help = "EXAMPLES:\n    # Check a file\n    clu check export.json\n\n    # Read from stdin\n    cat export.json | clu check -\n\n    # Emit machine-readable output\n    clu check export.json --json"
    )]
    Check(cmd::check::CheckArgs),

    #[command(
        about = "List resolved mentions",
        long_about = "Resolve a payload and list its top-level mentions, or show one mention by id.",
        after_help = "EXAMPLES:\n    # One tab-separated line per top-level mention\n    clu inspect export.json\n\n    # Show one mention, inline triggers included\n    clu inspect export.json --id TR1\n\n    # Emit snapshots as JSON\n    clu inspect export.json --json"
    )]
    Inspect(cmd::inspect::InspectArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("CLU_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "clu=debug,clu_core=debug,info"
        } else {
            "clu=info,warn"
        })
    });

    let format = env::var("CLU_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    let config = config::resolve_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Check(ref args) => cmd::check::run_check(args, &config, output),
        Commands::Inspect(ref args) => cmd::inspect::run_inspect(args, &config, output),
    }
}
