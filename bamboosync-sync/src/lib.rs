//! # bamboosync-sync
//!
//! One-way reconciliation of HR employees into the directory.
//!
//! Call [`pipeline::run`] with an [`HrSource`](bamboosync_core::HrSource), a
//! [`Directory`](bamboosync_core::Directory) and a [`Reporter`]; or drive a
//! [`SyncEngine`] directly.

pub mod engine;
pub mod error;
pub mod lookup;
pub mod pipeline;
pub mod report;
pub mod window;

pub use engine::{SyncEngine, SyncOptions, SyncSummary};
pub use error::{ResolveError, SyncError};
pub use report::{ErrorRecord, JsonLinesReporter, Record, Reporter};
pub use window::ChangeWindow;
