//! bamboosync: one-way BambooHR → Google Workspace directory sync.
//!
//! # Usage
//!
//! ```text
//! bamboosync update [--dry-run]
//! bamboosync sync [--lookback-hours <N> | --since <RFC3339>] [--dry-run]
//! ```
//!
//! Both commands need `--bamboo-subdomain`, `--bamboo-api-key`,
//! `--google-admin` and `--google-credentials` (or the matching environment
//! variables, or `~/.bamboosync/config.yaml`).
//!
//! Output records go to stdout, one JSON object per line. Logs go to stderr
//! and follow `RUST_LOG`.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{sync::SyncArgs, update::UpdateArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "bamboosync",
    version,
    about = "Sync BambooHR employees into the Google Workspace directory",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Set the HR correlation id and org unit on every existing account.
    Update(UpdateArgs),

    /// Insert, update and delete accounts from the HR change feed.
    Sync(SyncArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Update(args) => args.run(),
        Commands::Sync(args) => args.run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
