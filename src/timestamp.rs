//! Parsing of export timestamps into the canonical representation.
//!
//! EnVision writes local wall-clock times such as `10/13/2022 3:08:06 PM` with no
//! offset. Those are placed in the configured default offset. Timestamps that
//! already carry an offset (RFC 3339) keep it.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};

/// Naive formats accepted, tried in order.
const NAIVE_FORMATS: &[&str] = &[
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parses export timestamps, placing naive ones in a fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampParser {
    default_offset: FixedOffset,
}

impl Default for TimestampParser {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

impl TimestampParser {
    /// Creates a parser that interprets naive timestamps in `default_offset`.
    pub fn new(default_offset: FixedOffset) -> Self {
        Self { default_offset }
    }

    /// Parses one raw timestamp. Returns `None` if no accepted format matches.
    pub fn parse(&self, raw: &str) -> Option<DateTime<FixedOffset>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt);
        }

        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .and_then(|naive| self.default_offset.from_local_datetime(&naive).single())
    }
}
