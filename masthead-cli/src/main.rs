//! Masthead — propagate one canonical `<header>` block across a site's pages.
//!
//! # Usage
//!
//! ```text
//! masthead                          (same as `masthead sync`)
//! masthead sync [--dry-run] [--keep-going]
//! masthead diff
//! masthead status [--json]
//! masthead init [--template <path>] [--target <path>]... [--scan]
//!
//! global: --root <dir>  --manifest <file>
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use commands::{diff::DiffArgs, init::InitArgs, status::StatusArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "masthead",
    version,
    about = "Replace the <header> block of a fixed set of HTML pages with one template",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    site: SiteArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Where the site lives and which manifest describes it.
#[derive(Args, Debug, Clone, Default)]
pub struct SiteArgs {
    /// Site root; relative template and target paths resolve against it.
    /// Defaults to the manifest's directory, or the current directory.
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Manifest file to use instead of `<root>/masthead.yaml`.
    #[arg(long, global = true, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replace the header of every target page with the template (default).
    Sync(SyncArgs),

    /// Show unified diff of what sync would write.
    Diff(DiffArgs),

    /// Show whether each target's header matches the template.
    Status(StatusArgs),

    /// Write a masthead.yaml manifest for the site.
    Init(InitArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        None => SyncArgs::default().run(&cli.site),
        Some(Commands::Sync(args)) => args.run(&cli.site),
        Some(Commands::Diff(args)) => args.run(&cli.site),
        Some(Commands::Status(args)) => args.run(&cli.site),
        Some(Commands::Init(args)) => args.run(&cli.site),
    }
}

/// Diagnostics go to stderr; stdout carries only the report.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
