//! Shared entrypoint used by the `update` and `sync` commands.

use bamboosync_core::{Directory, HrSource};

use crate::engine::{SyncEngine, SyncOptions, SyncSummary};
use crate::report::Reporter;
use crate::window::ChangeWindow;
use crate::SyncError;

/// Which reconciliation to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Backfill correlation ids on every existing account.
    FullUpdate,
    /// Replay the HR change feed for a window.
    IncrementalSync(ChangeWindow),
}

/// Run `operation` against the two systems, streaming records to `reporter`.
pub fn run<H, D, R>(
    hr: H,
    directory: D,
    operation: &Operation,
    options: SyncOptions,
    reporter: &mut R,
) -> Result<SyncSummary, SyncError>
where
    H: HrSource,
    D: Directory,
    R: Reporter,
{
    let engine = SyncEngine::new(hr, directory, options);
    let summary = match operation {
        Operation::FullUpdate => engine.full_update(reporter)?,
        Operation::IncrementalSync(window) => engine.incremental_sync(window, reporter)?,
    };
    tracing::info!(
        inserted = summary.inserted,
        updated = summary.updated,
        deleted = summary.deleted,
        failed = summary.failed,
        skipped = summary.skipped,
        dry_run = options.dry_run,
        "run finished"
    );
    Ok(summary)
}
