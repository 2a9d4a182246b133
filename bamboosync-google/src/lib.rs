//! # bamboosync-google
//!
//! Google Workspace Admin Directory client implementing
//! [`Directory`](bamboosync_core::Directory), plus service-account token
//! acquisition in [`auth`].

pub mod auth;
pub mod client;

pub use auth::{ServiceAccountKey, ServiceAccountTokenSource, StaticToken, TokenSource};
pub use client::DirectoryClient;

use bamboosync_core::DirectoryError;

/// Directory client acting as `admin`, authenticated with the service
/// account `credentials` (path to, or inline, JSON key).
pub fn connect(admin: &str, credentials: &str) -> Result<DirectoryClient, DirectoryError> {
    let key = ServiceAccountKey::load(credentials)?;
    let tokens = ServiceAccountTokenSource::new(key, admin)?;
    Ok(DirectoryClient::new(Box::new(tokens)))
}
