// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.
//!
//! `DayKey` is the calendar-day value the whole ledger is keyed on: a
//! date-only, UTC-anchored day serialized as `YYYY-MM-DD`. It doubles as the
//! `dailyRecords` document id and as the range-queryable `date` field, so the
//! lexicographic order of the stored form matches chronological order.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Same, with millisecond precision (used for intake entry ids, where two
/// entries may land within the same second).
pub fn format_utc_rfc3339_millis(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A calendar day, UTC-anchored, stored as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today according to UTC.
    ///
    /// All day-boundary decisions (record keys, streak comparisons) use this
    /// single clock so client and store never disagree about what "today" is.
    pub fn today_utc() -> Self {
        Self(Utc::now().date_naive())
    }

    /// The calendar day containing a UTC timestamp.
    pub fn from_datetime_utc(dt: DateTime<Utc>) -> Self {
        Self(dt.date_naive())
    }

    /// Whole days from `earlier` to `self` (negative if `earlier` is later).
    pub fn days_since(self, earlier: DayKey) -> i64 {
        self.0.signed_duration_since(earlier.0).num_days()
    }

    /// Iterate every day in `[start, end]` in ascending order.
    ///
    /// Empty if `start > end`.
    pub fn range_inclusive(start: DayKey, end: DayKey) -> impl Iterator<Item = DayKey> {
        start
            .0
            .iter_days()
            .take_while(move |d| *d <= end.0)
            .map(DayKey)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DayKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(DayKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_display_round_trip() {
        let d = day("2024-03-09");
        assert_eq!(d.to_string(), "2024-03-09");
        assert_eq!(d.to_string().parse::<DayKey>().unwrap(), d);
    }

    #[test]
    fn test_rejects_non_date_strings() {
        assert!("not-a-date".parse::<DayKey>().is_err());
        assert!("2024-13-01".parse::<DayKey>().is_err());
        assert!("2024-02-30".parse::<DayKey>().is_err());
    }

    #[test]
    fn test_days_since() {
        assert_eq!(day("2024-03-09").days_since(day("2024-03-08")), 1);
        assert_eq!(day("2024-03-09").days_since(day("2024-03-09")), 0);
        assert_eq!(day("2024-03-09").days_since(day("2024-03-12")), -3);
        // Across a month boundary
        assert_eq!(day("2024-03-01").days_since(day("2024-02-29")), 1);
    }

    #[test]
    fn test_range_inclusive_counts_every_day() {
        let days: Vec<DayKey> =
            DayKey::range_inclusive(day("2024-02-26"), day("2024-03-03")).collect();
        assert_eq!(days.len(), 7); // leap year February
        assert_eq!(days.first().unwrap().to_string(), "2024-02-26");
        assert_eq!(days.last().unwrap().to_string(), "2024-03-03");
    }

    #[test]
    fn test_range_inclusive_single_day() {
        let days: Vec<DayKey> =
            DayKey::range_inclusive(day("2024-03-09"), day("2024-03-09")).collect();
        assert_eq!(days, vec![day("2024-03-09")]);
    }

    #[test]
    fn test_range_inclusive_empty_when_reversed() {
        let days: Vec<DayKey> =
            DayKey::range_inclusive(day("2024-03-09"), day("2024-03-08")).collect();
        assert!(days.is_empty());
    }

    #[test]
    fn test_serde_uses_plain_date_string() {
        let d = day("2024-03-09");
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2024-03-09\"");
        let back: DayKey = serde_json::from_str("\"2024-03-09\"").unwrap();
        assert_eq!(back, d);
    }
}
