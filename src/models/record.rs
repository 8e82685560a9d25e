//! Daily hydration ledger records.
//!
//! One `DailyRecord` exists per (user, calendar day), stored at
//! `users/{uid}/dailyRecords/{YYYY-MM-DD}`. The goal (`base_goal` +
//! `weather_adjustment`) is fixed when the record is created; entries only
//! ever accrue, and the percentage is derived from them.

use serde::{Deserialize, Serialize};

use crate::time_utils::DayKey;

/// Goal used when no profile context is available (ml).
pub const DEFAULT_DAILY_GOAL_ML: u32 = 2000;

/// One intake event. Owned by its parent record; never edited or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterEntry {
    /// Timestamp-derived id (RFC 3339, millisecond precision)
    pub id: String,
    /// When the intake happened (ISO 8601)
    pub time: String,
    /// Amount in ml, always > 0
    pub amount: u32,
}

/// The per-day ledger of goal and intake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: DayKey,
    /// Goal snapshot from the profile at creation time (ml)
    #[serde(default)]
    pub base_goal: u32,
    /// Signed ml delta from the weather sample taken at creation
    #[serde(default)]
    pub weather_adjustment: i32,
    /// base_goal + weather_adjustment; fixed for the lifetime of the record
    #[serde(default)]
    pub total_amount: u32,
    /// Sum of entry amounts (ml)
    #[serde(default)]
    pub completed_amount: u32,
    /// round(min(100, completed/total * 100)), integer 0-100
    #[serde(default)]
    pub percentage: u32,
    /// Intake events in insertion order
    #[serde(default)]
    pub entries: Vec<WaterEntry>,
    /// Last write (ISO 8601)
    #[serde(default)]
    pub last_updated: String,
}

impl DailyRecord {
    /// A fresh record for `date` with the goal sampled now.
    pub fn new(date: DayKey, base_goal: u32, weather_adjustment: i32, now: &str) -> Self {
        let total_amount = (i64::from(base_goal) + i64::from(weather_adjustment)).max(0) as u32;
        Self {
            date,
            base_goal,
            weather_adjustment,
            total_amount,
            completed_amount: 0,
            percentage: 0,
            entries: Vec::new(),
            last_updated: now.to_string(),
        }
    }

    /// Fallback record for the add-drink path when no record exists yet and
    /// no profile/weather context is consulted.
    pub fn with_default_goal(date: DayKey, now: &str) -> Self {
        Self::new(date, DEFAULT_DAILY_GOAL_ML, 0, now)
    }

    /// Zero-valued placeholder for days with no stored data.
    /// Never written back to storage.
    pub fn placeholder(date: DayKey) -> Self {
        Self {
            date,
            base_goal: 0,
            weather_adjustment: 0,
            total_amount: 0,
            completed_amount: 0,
            percentage: 0,
            entries: Vec::new(),
            last_updated: String::new(),
        }
    }

    /// Append an entry and recompute the derived fields.
    pub fn apply_intake(&mut self, entry: WaterEntry, now: &str) {
        self.completed_amount += entry.amount;
        self.entries.push(entry);
        self.percentage = completion_percentage(self.completed_amount, self.total_amount);
        self.last_updated = now.to_string();
    }

    /// Whether the day's goal has been met.
    pub fn goal_met(&self) -> bool {
        self.percentage >= 100
    }
}

/// Integer completion percentage, capped at 100.
///
/// The cap applies before rounding, matching the stored-percentage semantics
/// the streak threshold is defined against. A zero total counts as met.
pub fn completion_percentage(completed: u32, total: u32) -> u32 {
    if total == 0 {
        return 100;
    }
    let raw = (f64::from(completed) / f64::from(total)) * 100.0;
    raw.min(100.0).round() as u32
}
