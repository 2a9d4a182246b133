pub mod sync;
pub mod update;

use anyhow::{Context, Result};

use bamboosync_bamboo::BambooClient;
use bamboosync_sync::{
    pipeline::{self, Operation},
    JsonLinesReporter, SyncOptions,
};

use crate::config::{ConnectionArgs, Settings};

/// Resolve settings, connect both systems and run `operation`, printing one
/// JSON record per line on stdout.
pub(crate) fn execute(
    connection: &ConnectionArgs,
    operation: Operation,
    dry_run: bool,
) -> Result<()> {
    let home = dirs::home_dir();
    let settings = Settings::resolve(connection, home.as_deref())?;

    let hr = BambooClient::new(&settings.bamboo_subdomain, &settings.bamboo_api_key);
    let directory =
        bamboosync_google::connect(&settings.google_admin, &settings.google_credentials)
            .context("failed to set up the Google directory client")?;

    let stdout = std::io::stdout();
    let mut reporter = JsonLinesReporter::new(stdout.lock());
    pipeline::run(
        &hr,
        &directory,
        &operation,
        SyncOptions { dry_run },
        &mut reporter,
    )
    .context("sync run aborted")?;
    Ok(())
}
