//! Error types for bamboosync-sync.

use thiserror::Error;

use bamboosync_core::{DirectoryError, EmployeeId, HrError};

/// Errors that abort a sync run.
///
/// Per-employee directory API failures and correlation misses never surface
/// here; they are reported as output records and the run continues.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Any HR read failure.
    #[error("HR error: {0}")]
    Hr(#[from] HrError),

    /// A directory failure that is not an HTTP error reply.
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Output records could not be written.
    #[error("failed to write output record: {0}")]
    Report(#[from] std::io::Error),
}

/// Outcome of resolving an HR id to a directory user.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("User with external id {external_id} not found")]
    NotFound { external_id: EmployeeId },

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
