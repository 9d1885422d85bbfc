//! Display-local timestamps
//!
//! Log timestamps are ISO-8601 UTC strings. They are shifted by a fixed
//! display offset and then handled as naive local values for sorting and
//! printing. Anything missing or unparseable becomes [`LocalTime::UNKNOWN`],
//! which sorts before every real timestamp.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// Hours added to UTC log timestamps unless configured otherwise.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 8;

/// Text printed for timestamps that could not be parsed.
pub const UNKNOWN_TIME: &str = "unknown time";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Fixed shift from UTC to the display timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOffset {
    hours: i32,
}

impl DisplayOffset {
    /// Returns `None` unless `hours` is within -23..=23.
    pub fn from_hours(hours: i32) -> Option<Self> {
        (-23..=23).contains(&hours).then_some(Self { hours })
    }

    pub fn hours(&self) -> i32 {
        self.hours
    }
}

impl Default for DisplayOffset {
    fn default() -> Self {
        Self {
            hours: DEFAULT_UTC_OFFSET_HOURS,
        }
    }
}

/// A log timestamp in display-local time, or unknown.
///
/// Ordering follows the wrapped value with unknown first, so "most recent
/// first" sorts push unknown timestamps to the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalTime(Option<NaiveDateTime>);

impl LocalTime {
    pub const UNKNOWN: LocalTime = LocalTime(None);

    /// Parse an ISO-8601 timestamp and shift it into display time.
    ///
    /// Accepts `Z`-suffixed and explicit-offset RFC 3339 values, plus
    /// offset-less values which are read as UTC.
    pub fn parse(raw: &str, offset: DisplayOffset) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::UNKNOWN;
        }

        let utc = DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc).naive_utc())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"));

        match utc {
            Ok(naive) => {
                LocalTime(naive.checked_add_signed(Duration::hours(i64::from(offset.hours))))
            }
            Err(_) => Self::UNKNOWN,
        }
    }

    /// Parse an optional timestamp, treating `None` as unknown.
    pub fn parse_opt(raw: Option<&str>, offset: DisplayOffset) -> Self {
        raw.map(|raw| Self::parse(raw, offset)).unwrap_or_default()
    }

    pub fn is_known(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(naive) => write!(f, "{}", naive.format(DISPLAY_FORMAT)),
            None => f.write_str(UNKNOWN_TIME),
        }
    }
}

// Known values serialize as their display string, unknown as null.
impl Serialize for LocalTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(naive) => serializer.collect_str(&naive.format(DISPLAY_FORMAT)),
            None => serializer.serialize_none(),
        }
    }
}
