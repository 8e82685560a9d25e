// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Intake accrual service.
//!
//! Handles the core workflow of an "add drink" action:
//! 1. Validate the amount (nothing is mutated on invalid input)
//! 2. Build the timestamped entry
//! 3. Atomically append it, recompute the percentage, and advance the streak
//!    when the 100% threshold is crossed

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::WaterEntry;
use crate::time_utils::{format_utc_rfc3339_millis, DayKey};
use serde::Deserialize;

/// Validation message surfaced verbatim to the user.
const INVALID_AMOUNT_MSG: &str = "Enter a valid amount greater than 0";

/// An intake amount as it arrives over the wire. The mobile client sends the
/// raw text-field value, so both numbers and numeric strings are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

/// Validate an amount input into whole ml.
///
/// `0`, negatives, non-numeric strings, and non-finite values all fail with
/// the same validation error.
pub fn parse_amount(input: &AmountInput) -> Result<u32> {
    let value = match input {
        AmountInput::Number(n) => *n,
        AmountInput::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| AppError::Validation(INVALID_AMOUNT_MSG.to_string()))?,
    };

    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::Validation(INVALID_AMOUNT_MSG.to_string()));
    }

    let ml = value.round() as i64;
    if ml < 1 {
        return Err(AppError::Validation(INVALID_AMOUNT_MSG.to_string()));
    }
    Ok(ml as u32)
}

/// Appends intake events to the daily ledger.
#[derive(Clone)]
pub struct IntakeService {
    db: FirestoreDb,
}

impl IntakeService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Record an intake for `(uid, day)` and return the new percentage.
    ///
    /// If no record exists for the day yet, one is created with the default
    /// 2000 ml goal (the add-drink action can run before the day's record was
    /// lazily created by a goal check).
    pub async fn add_intake(&self, uid: &str, amount: &AmountInput, day: DayKey) -> Result<u32> {
        let amount_ml = parse_amount(amount)?;

        let now = format_utc_rfc3339_millis(chrono::Utc::now());
        let entry = WaterEntry {
            id: now.clone(),
            time: now.clone(),
            amount: amount_ml,
        };

        let percentage = self.db.add_intake_atomic(uid, day, entry, &now).await?;

        tracing::info!(user = uid, amount_ml, percentage, "Recorded intake");
        Ok(percentage)
    }
}
