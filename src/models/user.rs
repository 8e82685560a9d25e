//! User model for storage and API.

use serde::{Deserialize, Serialize};

use crate::models::streak::StreakState;
use crate::time_utils::DayKey;

/// User document stored in Firestore at `users/{uid}`.
///
/// The streak counters live top-level (next to the profile) so the
/// leaderboard can order the `users` collection by `current_streak` directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Identity-provider user id (also used as document ID)
    pub uid: String,
    /// Biometric profile and computed daily goal
    pub profile: Profile,
    /// Device settings persisted alongside the profile
    #[serde(default)]
    pub settings: Settings,
    /// Consecutive goal-met days
    #[serde(default)]
    pub current_streak: u32,
    /// Day the streak counter last advanced
    #[serde(default)]
    pub last_streak_update: Option<DayKey>,
    /// When the account was first seen
    #[serde(default)]
    pub created_at: String,
    /// Last profile write (ISO 8601)
    #[serde(default)]
    pub last_updated: String,
}

impl User {
    /// The user's streak counters as a standalone state value.
    pub fn streak_state(&self) -> StreakState {
        StreakState {
            current_streak: self.current_streak,
            last_streak_update: self.last_streak_update,
        }
    }
}

/// Biometric profile snapshot. All biometrics are optional; the goal
/// calculator substitutes defaults for missing values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Weight in kg
    pub weight: Option<f64>,
    /// Height in cm
    pub height: Option<f64>,
    /// Age in years
    pub age: Option<u32>,
    pub activity: Option<ActivityLevel>,
    pub gender: Option<Gender>,
    pub climate: Option<Climate>,
    /// Daily fluid goal in ml, computed at profile-save time
    pub daily_goal: Option<u32>,
}

/// Device settings shared with the external notification scheduler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Last known geolocation, used as the weather lookup fallback
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Reminder preferences consumed by the notification scheduler
/// (out of core scope; persisted here because it shares the user document).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub enabled: bool,
    /// Minutes between reminders
    pub reminder_frequency: u32,
    /// "HH:MM", first reminder of the day
    pub start_time: String,
    /// "HH:MM", last reminder of the day
    pub end_time: String,
    pub sound_enabled: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            reminder_frequency: 120,
            start_time: "08:00".to_string(),
            end_time: "22:00".to_string(),
            sound_enabled: true,
        }
    }
}

/// Self-reported activity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Very,
    Extreme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Coarse climate tag for the user's usual environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Climate {
    Hot,
    Humid,
    Dry,
    Cold,
    Moderate,
}
