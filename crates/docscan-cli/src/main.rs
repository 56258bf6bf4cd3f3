//! docscan CLI tool.
//!
//! Usage:
//! ```bash
//! docscan [OPTIONS] [PATH]
//! docscan scan [OPTIONS] [PATH]
//! docscan languages
//! docscan init
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Summarize a source tree (file tree and function signatures) for documentation
#[derive(Parser)]
#[command(name = "docscan")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    scan: ScanArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory (the default when no subcommand is given)
    Scan(ScanArgs),

    /// List supported languages, their extensions and pattern families
    Languages,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Arguments of the scan command.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Directory to scan (default: current directory)
    path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "markdown")]
    format: OutputFormat,

    /// Maximum signatures listed per file
    #[arg(long)]
    max_signatures: Option<usize>,

    /// Exclude patterns (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,
}

/// Output format for scan reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Project structure and markdown signature tables.
    #[default]
    Markdown,
    /// JSON output, including skipped files.
    Json,
    /// One-line-per-signature compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Scan(args)) => commands::scan::run(&args, cli.config.as_deref()),
        None => commands::scan::run(&cli.scan, cli.config.as_deref()),
        Some(Commands::Languages) => commands::languages::run(cli.config.as_deref()),
        Some(Commands::Init { force }) => commands::init::run(force),
    }
}
