use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;
use std::fmt;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Render a timestamp as ISO-8601 with microseconds and a `Z` suffix
/// (e.g. `2026-10-18T09:15:02.123456Z`).
pub fn iso_utc(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Serde helper for timestamp fields rendered with [`iso_utc`]
pub fn serialize_iso_utc<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&iso_utc(ts))
}

/// Ticker symbol as requested by the caller
///
/// The raw value is kept for upstream lookups; [`Ticker::symbol`] gives the
/// uppercased form used in responses. Any value is accepted, blank included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticker(String);

impl Ticker {
    pub fn new(raw: impl Into<String>) -> Self {
        Ticker(raw.into())
    }

    /// Raw value, exactly as received
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Uppercased symbol
    pub fn symbol(&self) -> String {
        self.0.to_uppercase()
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
