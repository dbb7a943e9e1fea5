//! Calendar dates and the sortable day keys derived from them
//!
//! Listing days are identified by keys of the form `day_YYYY_MM_DD`. Because
//! every component is zero-padded, comparing two keys as strings gives the
//! same answer as comparing the dates on a calendar, which is how the crawl
//! decides when it has passed its end boundary.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A Gregorian calendar date as written in the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    /// Creates a date without checking that it exists
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Converts to a chrono date, or `None` if the date does not exist
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Returns true if this names a real Gregorian date
    pub fn is_valid(&self) -> bool {
        self.to_naive().is_some()
    }

    /// Canonical `day_YYYY_MM_DD` key for this date
    pub fn key(&self) -> DateKey {
        DateKey(format!(
            "day_{:04}_{:02}_{:02}",
            self.year, self.month, self.day
        ))
    }

    /// `YYYY-MM-DD` form, as used in query strings
    pub fn iso(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Parses a `YYYY-MM-DD` string
    pub fn parse_iso(text: &str) -> Option<Self> {
        NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .ok()
            .map(Self::from)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso())
    }
}

/// Sortable day identifier (`day_YYYY_MM_DD`)
///
/// Ordering is plain string ordering. Keys read from listing pages are taken
/// verbatim, so two keys only compare meaningfully when both are zero-padded.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    /// Wraps a key exactly as found on a page
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<CalendarDate> for DateKey {
    fn from(date: CalendarDate) -> Self {
        date.key()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
