//! `bamboosync sync`: apply recent HR changes to the directory.

use anyhow::Result;
use bamboosync_sync::{
    pipeline::Operation,
    window::{DEFAULT_LOOKBACK_HOURS, MAX_LOOKBACK_HOURS},
    ChangeWindow,
};
use chrono::{DateTime, FixedOffset, Utc};
use clap::Args;

use crate::config::ConnectionArgs;

/// Arguments for `bamboosync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// How far back the HR change feed is read.
    #[arg(
        long,
        default_value_t = DEFAULT_LOOKBACK_HOURS,
        value_parser = clap::value_parser!(i64).range(1..=MAX_LOOKBACK_HOURS)
    )]
    pub lookback_hours: i64,

    /// Read changes since this RFC 3339 instant instead of a lookback.
    #[arg(long, conflicts_with = "lookback_hours", value_parser = parse_since)]
    pub since: Option<DateTime<FixedOffset>>,

    /// Report what would change without calling the directory.
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let window = self.window(Utc::now());
        super::execute(
            &self.connection,
            Operation::IncrementalSync(window),
            self.dry_run,
        )
    }

    fn window(&self, now: DateTime<Utc>) -> ChangeWindow {
        match self.since {
            Some(since) => ChangeWindow::starting_at(since),
            None => ChangeWindow::lookback(now, self.lookback_hours),
        }
    }
}

fn parse_since(s: &str) -> std::result::Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(s).map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}
