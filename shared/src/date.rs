//! Timestamp module
//!
//! Backend timestamps arrive as RFC 3339 strings, sometimes as bare dates,
//! sometimes missing or malformed. `Timestamp` parses what it can and the
//! lenient deserializer turns everything else into `None` instead of failing
//! the whole page.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Placeholder shown for missing or unparseable dates.
pub const MISSING_DATE: &str = "—";

// =========================================================
// Timestamp
// =========================================================

/// A UTC instant received from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    #[inline]
    pub const fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Parses RFC 3339, `YYYY-MM-DDTHH:MM:SS` (assumed UTC) or `YYYY-MM-DD`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self(at.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(Self(naive.and_utc()));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc()))
    }

    #[inline]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Day-first calendar date, e.g. `05/03/2024`.
    pub fn display_date(&self) -> String {
        self.0.format("%d/%m/%Y").to_string()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// Formats an optional timestamp for tables.
pub fn display_date(at: Option<&Timestamp>) -> String {
    at.map(Timestamp::display_date)
        .unwrap_or_else(|| MISSING_DATE.to_string())
}

/// Deserializes an optional timestamp, mapping anything unparseable to `None`.
pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => Timestamp::parse(&s),
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(Timestamp),
        _ => None,
    })
}
