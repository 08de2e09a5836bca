//! Watermark domain type
//!
//! The boundary between comments that have already been notified and
//! comments still pending notification.

use chrono::{DateTime, Duration, FixedOffset, SecondsFormat, TimeZone};
use tracing::debug;

use crate::error::NotifyError;

/// A point in time with its original UTC offset
///
/// Equality and ordering compare instants, so two watermarks written with
/// different offsets but naming the same moment are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Watermark(DateTime<FixedOffset>);

impl Watermark {
    /// Wrap any timezone-aware datetime
    pub fn new<Tz: TimeZone>(at: DateTime<Tz>) -> Self {
        Self(at.fixed_offset())
    }

    /// The watermark used when no previous run was recorded: one day before `now`
    pub fn fallback(now: Watermark) -> Self {
        debug!(%now, "Watermark::fallback: called");
        Self(now.0 - Duration::days(1))
    }

    /// Parse an RFC 3339 / ISO-8601 timestamp with offset
    pub fn parse(value: &str) -> Result<Self, NotifyError> {
        debug!(%value, "Watermark::parse: called");
        DateTime::parse_from_rfc3339(value.trim())
            .map(Self)
            .map_err(|source| NotifyError::TimestampParse {
                value: value.to_string(),
                source,
            })
    }

    /// Serialize in RFC 3339 keeping the offset and all sub-second digits
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }

    /// Whether a timestamp falls at or after this watermark (inclusive)
    pub fn admits(&self, at: &DateTime<FixedOffset>) -> bool {
        *at >= self.0
    }
}

impl std::fmt::Display for Watermark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}
