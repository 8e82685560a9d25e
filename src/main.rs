// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Hydro-Tracker API Server
//!
//! Tracks daily fluid intake against personalized, weather-adjusted goals
//! and derives streaks and leaderboard ranks from the per-day ledger.

use hydro_tracker::{
    config::Config,
    db::FirestoreDb,
    services::{HistoryService, IntakeService, LeaderboardService, RecordService, WeatherClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Hydro-Tracker API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Initialize the weather client
    let weather = WeatherClient::new(config.weather_api_key.clone());
    tracing::info!("Weather client initialized");

    // Build services
    let records = RecordService::new(db.clone(), weather);
    let intake = IntakeService::new(db.clone());
    let history = HistoryService::new(db.clone());
    let leaderboard = LeaderboardService::new(db.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        records,
        intake,
        history,
        leaderboard,
    });

    // Build router
    let app = hydro_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hydro_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
