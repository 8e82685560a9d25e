// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! History aggregation with gap-fill.
//!
//! Fetches a contiguous date range of daily records and fills every missing
//! day with a zero-valued placeholder, so callers (charts, calendars) always
//! get exactly one entry per day in the range. Placeholders are never written
//! back to storage.

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::DailyRecord;
use crate::time_utils::DayKey;
use std::collections::BTreeMap;

/// Read-only range views over the daily ledger.
#[derive(Clone)]
pub struct HistoryService {
    db: FirestoreDb,
}

impl HistoryService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Records for every day in `[start, end]` inclusive, keyed by day.
    ///
    /// The result always holds exactly `(end - start).days + 1` entries.
    pub async fn range_progress(
        &self,
        uid: &str,
        start: DayKey,
        end: DayKey,
    ) -> Result<BTreeMap<String, DailyRecord>> {
        if start > end {
            return Err(AppError::BadRequest(
                "start date must not be after end date".to_string(),
            ));
        }

        let records = self.db.get_daily_records_in_range(uid, start, end).await?;

        tracing::debug!(
            user = uid,
            start = %start,
            end = %end,
            stored = records.len(),
            "Fetched history range"
        );

        let mut by_day: BTreeMap<String, DailyRecord> = records
            .into_iter()
            .map(|r| (r.date.to_string(), r))
            .collect();
        fill_missing_days(start, end, &mut by_day);

        Ok(by_day)
    }
}

/// Insert a zero-valued placeholder for every day in `[start, end]` absent
/// from the map.
pub fn fill_missing_days(start: DayKey, end: DayKey, by_day: &mut BTreeMap<String, DailyRecord>) {
    for day in DayKey::range_inclusive(start, end) {
        by_day
            .entry(day.to_string())
            .or_insert_with(|| DailyRecord::placeholder(day));
    }
}
