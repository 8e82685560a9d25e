// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::user::{ActivityLevel, Climate, Gender, NotificationSettings};
use crate::models::{DailyRecord, GeoPoint, Profile, Settings, User};
use crate::services::goal::{calculate_daily_goal, GoalInputs};
use crate::services::intake::AmountInput;
use crate::services::leaderboard::Standings;
use crate::time_utils::{format_utc_rfc3339, DayKey};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use validator::Validate;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/profile", put(update_profile))
        .route("/api/today", get(get_today))
        .route("/api/intake", post(add_intake))
        .route("/api/history", get(get_history))
        .route("/api/leaderboard", get(get_leaderboard))
        .route("/api/account", delete(delete_account))
}

// ─── User Profile ────────────────────────────────────────────

/// Get current user document (profile, settings, streak).
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<User>> {
    let user_doc = state
        .db
        .get_user(&user.uid)
        .await?
        .ok_or_else(|| crate::error::AppError::NotFound(format!("User {} not found", user.uid)))?;

    Ok(Json(user_doc))
}

/// Profile save payload. The daily goal is never client-supplied; it is
/// recomputed here from the biometrics.
#[derive(Deserialize, Validate)]
pub struct ProfileUpdateRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(range(min = 20.0, max = 300.0))]
    pub weight: Option<f64>,
    #[validate(range(min = 100.0, max = 250.0))]
    pub height: Option<f64>,
    #[validate(range(min = 13, max = 120))]
    pub age: Option<u32>,
    pub activity: Option<ActivityLevel>,
    pub gender: Option<Gender>,
    pub climate: Option<Climate>,
    pub location: Option<GeoPoint>,
    pub notifications: Option<NotificationSettings>,
}

#[derive(Serialize)]
pub struct ProfileUpdateResponse {
    /// Recomputed daily goal (ml)
    pub daily_goal: u32,
}

/// Save the profile and recompute the daily goal from the biometrics.
///
/// The recomputed goal only affects records created after this write; an
/// existing day keeps the goal it was created with.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ProfileUpdateRequest>,
) -> Result<Json<ProfileUpdateResponse>> {
    payload
        .validate()
        .map_err(|e| crate::error::AppError::Validation(e.to_string()))?;

    let profile = Profile {
        name: payload.name,
        email: payload.email,
        weight: payload.weight,
        height: payload.height,
        age: payload.age,
        activity: payload.activity,
        gender: payload.gender,
        climate: payload.climate,
        daily_goal: None,
    };
    let daily_goal = calculate_daily_goal(&GoalInputs::from(&profile));
    let now = format_utc_rfc3339(chrono::Utc::now());

    // Fetch-modify-write to preserve streak counters and created_at
    let existing = state.db.get_user(&user.uid).await?;
    let user_doc = match existing {
        Some(mut doc) => {
            doc.profile = Profile {
                daily_goal: Some(daily_goal),
                ..profile
            };
            if let Some(location) = payload.location {
                doc.settings.location = Some(location);
            }
            if let Some(notifications) = payload.notifications {
                doc.settings.notifications = notifications;
            }
            doc.last_updated = now;
            doc
        }
        None => User {
            uid: user.uid.clone(),
            profile: Profile {
                daily_goal: Some(daily_goal),
                ..profile
            },
            settings: Settings {
                location: payload.location,
                notifications: payload.notifications.unwrap_or_default(),
            },
            current_streak: 0,
            last_streak_update: None,
            created_at: now.clone(),
            last_updated: now,
        },
    };

    state.db.upsert_user(&user_doc).await?;

    tracing::info!(user = %user.uid, daily_goal, "Profile saved");

    Ok(Json(ProfileUpdateResponse { daily_goal }))
}

// ─── Daily Record ────────────────────────────────────────────

#[derive(Deserialize)]
struct TodayQuery {
    /// Live device latitude (optional; stored location is the fallback)
    lat: Option<f64>,
    /// Live device longitude
    lon: Option<f64>,
}

/// Get today's record, creating it (goal + weather sample) on first access.
async fn get_today(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<TodayQuery>,
) -> Result<Json<DailyRecord>> {
    let live_location = match (params.lat, params.lon) {
        (Some(latitude), Some(longitude)) => Some(GeoPoint {
            latitude,
            longitude,
        }),
        _ => None,
    };

    let record = state
        .records
        .get_or_create(&user.uid, DayKey::today_utc(), live_location)
        .await?;

    Ok(Json(record))
}

// ─── Intake ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct AddIntakeRequest {
    /// Amount in ml; number or numeric string
    amount: AmountInput,
    /// Defaults to today (UTC)
    date: Option<DayKey>,
}

#[derive(Serialize)]
pub struct AddIntakeResponse {
    pub percentage: u32,
}

/// Record a drink and return the day's new completion percentage.
async fn add_intake(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<AddIntakeRequest>,
) -> Result<Json<AddIntakeResponse>> {
    let day = payload.date.unwrap_or_else(DayKey::today_utc);

    let percentage = state
        .intake
        .add_intake(&user.uid, &payload.amount, day)
        .await?;

    Ok(Json(AddIntakeResponse { percentage }))
}

// ─── History ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct HistoryQuery {
    /// Inclusive range start (YYYY-MM-DD)
    start: String,
    /// Inclusive range end (YYYY-MM-DD)
    end: String,
}

fn parse_day(raw: &str, param: &str) -> Result<DayKey> {
    raw.parse().map_err(|_| {
        crate::error::AppError::BadRequest(format!(
            "Invalid '{}' parameter: must be YYYY-MM-DD",
            param
        ))
    })
}

/// Get gap-filled records for every day in the range.
async fn get_history(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<BTreeMap<String, DailyRecord>>> {
    let start = parse_day(&params.start, "start")?;
    let end = parse_day(&params.end, "end")?;

    let days = state.history.range_progress(&user.uid, start, end).await?;

    Ok(Json(days))
}

// ─── Leaderboard ─────────────────────────────────────────────

/// Get the top streaks and the caller's rank.
async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Standings>> {
    let standings = state.leaderboard.standings(&user.uid).await?;
    Ok(Json(standings))
}

// ─── Account Deletion ────────────────────────────────────────

/// Response for account deletion.
#[derive(Serialize)]
pub struct DeleteAccountResponse {
    pub success: bool,
    pub deleted_documents: usize,
}

/// Delete the user's account and all associated data.
///
/// Removes every daily record and the user document. Synchronous; the
/// response reports how many documents were removed.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DeleteAccountResponse>> {
    tracing::info!(user = %user.uid, "User-initiated account deletion");

    let deleted_documents = state.db.delete_user_data(&user.uid).await?;

    Ok(Json(DeleteAccountResponse {
        success: true,
        deleted_documents,
    }))
}
