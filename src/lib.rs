// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Hydro-Tracker: daily fluid intake against weather-adjusted goals
//!
//! This crate provides the backend API for the hydration ledger: per-day
//! intake records, personalized goals, streaks, history, and the leaderboard.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{HistoryService, IntakeService, LeaderboardService, RecordService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub records: RecordService,
    pub intake: IntakeService,
    pub history: HistoryService,
    pub leaderboard: LeaderboardService,
}
