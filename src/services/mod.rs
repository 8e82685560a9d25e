// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod goal;
pub mod history;
pub mod intake;
pub mod leaderboard;
pub mod records;
pub mod weather;

pub use history::HistoryService;
pub use intake::IntakeService;
pub use leaderboard::LeaderboardService;
pub use records::RecordService;
pub use weather::WeatherClient;
