// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod record;
pub mod streak;
pub mod user;

pub use record::{DailyRecord, WaterEntry, DEFAULT_DAILY_GOAL_ML};
pub use streak::StreakState;
pub use user::{ActivityLevel, Climate, Gender, GeoPoint, Profile, Settings, User};
