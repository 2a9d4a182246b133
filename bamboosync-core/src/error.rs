//! Error types for the HR and directory seams.

use serde::Serialize;
use thiserror::Error;

use crate::types::EmployeeId;

/// Failures reading from the HR system. Every variant aborts a run.
#[derive(Debug, Error)]
pub enum HrError {
    /// The HR API answered with a non-success status.
    #[error("HR request {path} failed with status {status}: {body}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },

    /// Network-level failure (DNS, TLS, connection reset, ...).
    #[error("HR transport error on {path}: {message}")]
    Transport { path: String, message: String },

    /// The response body was not the JSON shape expected.
    #[error("failed to decode HR response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Non-success reply from the directory service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiError {
    pub status_code: u16,
    pub reason: String,
    pub error_details: serde_json::Value,
}

/// Failures talking to the directory service.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// HTTP error reply. Recoverable: reported per employee.
    #[error("directory API error {}: {}", .0.status_code, .0.reason)]
    Api(ApiError),

    /// Network-level failure.
    #[error("directory transport error: {0}")]
    Transport(String),

    /// A success reply whose body could not be decoded.
    #[error("failed to decode directory response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Credential loading or token exchange failed.
    #[error("directory authentication failed: {0}")]
    Auth(String),
}

impl DirectoryError {
    /// Whether the sync engine reports this error and moves on to the next
    /// employee instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DirectoryError::Api(_))
    }
}

/// An HR record that cannot be mapped to a directory request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("employee {id} has no work email")]
    MissingWorkEmail { id: EmployeeId },
}
