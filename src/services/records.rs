// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily record get-or-create.
//!
//! Handles the lazy per-day goal computation:
//! 1. Return the stored record if the day already exists
//! 2. Otherwise read the profile for the base goal
//! 3. Sample the weather once (live location, stored location, or origin)
//! 4. Write and re-read the new record
//!
//! The goal and adjustment are sampled exactly once per day. A record that
//! already exists is returned unchanged even if the profile or weather has
//! since moved.

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::record::DEFAULT_DAILY_GOAL_ML;
use crate::models::{DailyRecord, GeoPoint};
use crate::services::weather::{goal_adjustment, WeatherClient};
use crate::time_utils::{format_utc_rfc3339, DayKey};

/// Get-or-create for the per-day ledger record.
#[derive(Clone)]
pub struct RecordService {
    db: FirestoreDb,
    weather: WeatherClient,
}

impl RecordService {
    pub fn new(db: FirestoreDb, weather: WeatherClient) -> Self {
        Self { db, weather }
    }

    /// Return the record for `(uid, day)`, creating it on first access.
    ///
    /// `live_location` is the device's current coordinate if the client sent
    /// one; otherwise the profile's last stored location is used, and failing
    /// that `(0, 0)`.
    ///
    /// Fails with `NotFound` if the user profile does not exist.
    pub async fn get_or_create(
        &self,
        uid: &str,
        day: DayKey,
        live_location: Option<GeoPoint>,
    ) -> Result<DailyRecord> {
        if let Some(existing) = self.db.get_daily_record(uid, day).await? {
            return Ok(existing);
        }

        let user = self
            .db
            .get_user(uid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", uid)))?;

        let base_goal = user.profile.daily_goal.unwrap_or(DEFAULT_DAILY_GOAL_ML);
        let location = live_location
            .or(user.settings.location)
            .unwrap_or_default();

        // Degrade silently: a dead weather API must not block the day, so a
        // failed lookup becomes a zero adjustment instead of an error.
        let weather_adjustment = match self
            .weather
            .realtime(location.latitude, location.longitude)
            .await
        {
            Ok(sample) => goal_adjustment(&sample),
            Err(e) => {
                tracing::warn!(user = uid, error = %e, "Weather lookup failed, using zero adjustment");
                0
            }
        };

        let now = format_utc_rfc3339(chrono::Utc::now());
        let record = DailyRecord::new(day, base_goal, weather_adjustment, &now);

        tracing::info!(
            user = uid,
            day = %day,
            base_goal,
            weather_adjustment,
            "Created daily record"
        );

        self.db.set_daily_record(uid, &record).await?;

        // Re-read so the caller sees exactly what the store now holds
        self.db
            .get_daily_record(uid, day)
            .await?
            .ok_or_else(|| AppError::Database("Daily record missing after write".to_string()))
    }
}
