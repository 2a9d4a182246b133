//! Line-oriented output records, one JSON object per mutation or failure.

use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use bamboosync_core::{ApiError, UserBody};

fn is_false(b: &bool) -> bool {
    !*b
}

/// A single output record.
///
/// Request bodies are stored already redacted; records are meant to be
/// printed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record {
    InsertUser {
        body: UserBody,
        #[serde(skip_serializing_if = "is_false")]
        dry_run: bool,
    },
    UpdateUser {
        #[serde(rename = "userKey")]
        user_key: String,
        body: UserBody,
        #[serde(skip_serializing_if = "is_false")]
        dry_run: bool,
    },
    DeleteUser {
        #[serde(rename = "userKey")]
        user_key: String,
        #[serde(skip_serializing_if = "is_false")]
        dry_run: bool,
    },
    Error(ErrorRecord),
}

/// Payload of an `error` record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorRecord {
    /// Directory API error reply, with the request that triggered it.
    Api {
        status_code: u16,
        reason: String,
        error_details: Value,
        #[serde(rename = "userKey", skip_serializing_if = "Option::is_none")]
        user_key: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        body: Option<UserBody>,
    },
    /// Anything reported as a human-readable cause (correlation misses,
    /// unmappable HR records).
    Cause { cause: String },
}

impl Record {
    pub fn insert(body: &UserBody, dry_run: bool) -> Self {
        Record::InsertUser {
            body: body.redacted(),
            dry_run,
        }
    }

    pub fn update(user_key: &str, body: &UserBody, dry_run: bool) -> Self {
        Record::UpdateUser {
            user_key: user_key.to_owned(),
            body: body.redacted(),
            dry_run,
        }
    }

    pub fn delete(user_key: &str, dry_run: bool) -> Self {
        Record::DeleteUser {
            user_key: user_key.to_owned(),
            dry_run,
        }
    }

    pub fn api_error(err: ApiError, user_key: Option<&str>, body: Option<&UserBody>) -> Self {
        Record::Error(ErrorRecord::Api {
            status_code: err.status_code,
            reason: err.reason,
            error_details: err.error_details,
            user_key: user_key.map(str::to_owned),
            body: body.map(UserBody::redacted),
        })
    }

    pub fn cause(cause: impl Into<String>) -> Self {
        Record::Error(ErrorRecord::Cause {
            cause: cause.into(),
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Record::Error(_))
    }
}

/// Sink for output records.
pub trait Reporter {
    fn report(&mut self, record: Record) -> std::io::Result<()>;
}

/// Collects records in memory.
impl Reporter for Vec<Record> {
    fn report(&mut self, record: Record) -> std::io::Result<()> {
        self.push(record);
        Ok(())
    }
}

/// Writes each record as one JSON line and flushes.
pub struct JsonLinesReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonLinesReporter<W> {
    fn report(&mut self, record: Record) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.out, &record)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
