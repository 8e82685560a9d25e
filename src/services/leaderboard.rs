// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Streak leaderboard.
//!
//! Ranks all users by `current_streak` descending. The top slice is a small
//! display projection; the caller's own rank comes from the full ordering.
//! Ties keep whatever stable order the store returns.

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::User;
use serde::Serialize;

/// Number of entries in the displayed top slice.
pub const LEADERBOARD_SIZE: u32 = 10;

/// Display projection of one ranked user. Derived at query time, never
/// persisted.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub id: String,
    pub name: String,
    pub streak: u32,
}

impl From<&User> for LeaderboardEntry {
    fn from(user: &User) -> Self {
        let name = if user.profile.name.is_empty() {
            "Unknown".to_string()
        } else {
            user.profile.name.clone()
        };
        Self {
            id: user.uid.clone(),
            name,
            streak: user.current_streak,
        }
    }
}

/// The leaderboard as seen by one user.
#[derive(Debug, Clone, Serialize)]
pub struct Standings {
    /// Top users by streak, descending
    pub leaderboard: Vec<LeaderboardEntry>,
    /// 1-based rank of the requesting user in the full ordering
    pub position: u32,
    pub total_users: u32,
}

/// Builds leaderboard views from the `users` collection.
#[derive(Clone)]
pub struct LeaderboardService {
    db: FirestoreDb,
}

impl LeaderboardService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Top-10 slice plus the requesting user's rank and the total count.
    ///
    /// Fails with `NotFound` if `uid` does not appear in the ordering.
    pub async fn standings(&self, uid: &str) -> Result<Standings> {
        let top = self.db.users_by_streak(Some(LEADERBOARD_SIZE)).await?;
        let all = self.db.users_by_streak(None).await?;

        let leaderboard: Vec<LeaderboardEntry> =
            top.iter().map(LeaderboardEntry::from).collect();

        let position = all
            .iter()
            .position(|user| user.uid == uid)
            .map(|index| index as u32 + 1)
            .ok_or_else(|| AppError::NotFound(format!("User {} not ranked", uid)))?;

        let total_users = all.len() as u32;

        tracing::debug!(user = uid, position, total_users, "Built leaderboard");

        Ok(Standings {
            leaderboard,
            position,
            total_users,
        })
    }
}
