// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use hydro_tracker::config::Config;
use hydro_tracker::db::FirestoreDb;
use hydro_tracker::models::{Profile, User};
use hydro_tracker::routes::create_router;
use hydro_tracker::services::{
    HistoryService, IntakeService, LeaderboardService, RecordService, WeatherClient,
};
use hydro_tracker::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Weather client pointed at a dead endpoint: every lookup fails fast, which
/// exercises the zero-adjustment fallback without real network traffic.
#[allow(dead_code)]
pub fn test_weather_client() -> WeatherClient {
    WeatherClient::with_base_url(
        "test_weather_key".to_string(),
        "http://127.0.0.1:1/v4".to_string(),
    )
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let db = test_db_offline();
    let state = Arc::new(build_state(config, db));
    (create_router(state.clone()), state)
}

/// Create a test app backed by the Firestore emulator.
#[allow(dead_code)]
pub async fn create_emulator_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let db = test_db().await;
    let state = Arc::new(build_state(config, db));
    (create_router(state.clone()), state)
}

fn build_state(config: Config, db: FirestoreDb) -> AppState {
    let weather = test_weather_client();
    AppState {
        config,
        records: RecordService::new(db.clone(), weather),
        intake: IntakeService::new(db.clone()),
        history: HistoryService::new(db.clone()),
        leaderboard: LeaderboardService::new(db.clone()),
        db,
    }
}

/// Create a signed JWT for a test user.
#[allow(dead_code)]
pub fn create_test_jwt(uid: &str, signing_key: &[u8]) -> String {
    hydro_tracker::middleware::auth::create_jwt(uid, signing_key).expect("Failed to create JWT")
}

/// Generate a unique user id for test isolation.
#[allow(dead_code)]
pub fn unique_uid() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    format!(
        "test-user-{}",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    )
}

/// Helper to create a basic test user.
#[allow(dead_code)]
pub fn test_user(uid: &str) -> User {
    User {
        uid: uid.to_string(),
        profile: Profile {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            weight: Some(70.0),
            height: Some(170.0),
            age: Some(30),
            activity: None,
            gender: None,
            climate: None,
            daily_goal: Some(2450),
        },
        settings: Default::default(),
        current_streak: 0,
        last_streak_update: None,
        created_at: chrono::Utc::now().to_rfc3339(),
        last_updated: chrono::Utc::now().to_rfc3339(),
    }
}
