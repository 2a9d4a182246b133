//! # bamboosync-bamboo
//!
//! BambooHR client. [`BambooClient::get`] performs authenticated GETs against
//! arbitrary API paths; the [`HrSource`](bamboosync_core::HrSource) impl in
//! [`source`] provides the three typed reads the sync engine needs.

pub mod client;
pub mod source;

pub use client::BambooClient;
