//! `bamboosync update`: backfill correlation ids on existing accounts.

use anyhow::Result;
use bamboosync_sync::pipeline::Operation;
use clap::Args;

use crate::config::ConnectionArgs;

/// Arguments for `bamboosync update`.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Report what would change without calling the directory.
    #[arg(long)]
    pub dry_run: bool,
}

impl UpdateArgs {
    pub fn run(self) -> Result<()> {
        super::execute(&self.connection, Operation::FullUpdate, self.dry_run)
    }
}
