//! Time window for the HR change feed.

use chrono::{DateTime, Duration, FixedOffset, Utc};

/// `since` rendering expected by the change feed, e.g.
/// `2026-10-15T09:30:00+0000`.
pub const SINCE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

pub const DEFAULT_LOOKBACK_HOURS: i64 = 24;

/// Longest accepted lookback, ten years.
pub const MAX_LOOKBACK_HOURS: i64 = 24 * 366 * 10;

/// Start of the change window. Nothing is persisted between runs; the window
/// is recomputed from the clock every time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeWindow {
    since: DateTime<FixedOffset>,
}

impl ChangeWindow {
    /// Window covering the `hours` before `now`, with `hours` clamped to
    /// `1..=MAX_LOOKBACK_HOURS`.
    pub fn lookback(now: DateTime<Utc>, hours: i64) -> Self {
        let hours = hours.clamp(1, MAX_LOOKBACK_HOURS);
        let since = now
            .checked_sub_signed(Duration::hours(hours))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self {
            since: since.into(),
        }
    }

    /// The default one-day window ending now.
    pub fn last_day() -> Self {
        Self::lookback(Utc::now(), DEFAULT_LOOKBACK_HOURS)
    }

    /// Window starting at an explicit instant, keeping its offset.
    pub fn starting_at(since: DateTime<FixedOffset>) -> Self {
        Self { since }
    }

    pub fn since(&self) -> DateTime<FixedOffset> {
        self.since
    }

    /// Value of the `since` query parameter.
    pub fn since_param(&self) -> String {
        self.since.format(SINCE_FORMAT).to_string()
    }
}
