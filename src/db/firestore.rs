// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile + streak storage)
//! - Daily records (per-user hydration ledger subcollection)
//! - Leaderboard queries (users ordered by streak)
//!
//! Layout:
//! - `users/{uid}`
//! - `users/{uid}/dailyRecords/{YYYY-MM-DD}`

use crate::db::collections;
use crate::error::AppError;
use crate::models::streak::StreakState;
use crate::models::{DailyRecord, User, WaterEntry};
use crate::time_utils::DayKey;
use firestore::paths;
use futures_util::{stream, StreamExt};

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing async-trait
        // or a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Parent path for a user's `dailyRecords` subcollection.
    fn daily_records_parent(&self, uid: &str) -> Result<firestore::ParentPathBuilder, AppError> {
        self.get_client()?
            .parent_path(collections::USERS, uid)
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by id.
    pub async fn get_user(&self, uid: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(uid)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a user document.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.uid)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Merge-write only the streak fields onto a user document.
    ///
    /// Creates the document if it does not exist; all other fields are left
    /// untouched.
    pub async fn set_streak(&self, uid: &str, state: &StreakState) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(paths!(StreakState::{current_streak, last_streak_update}))
            .in_col(collections::USERS)
            .document_id(uid)
            .object(state)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Daily Record Operations ─────────────────────────────────

    /// Get a user's record for one calendar day.
    pub async fn get_daily_record(
        &self,
        uid: &str,
        day: DayKey,
    ) -> Result<Option<DailyRecord>, AppError> {
        let parent_path = self.daily_records_parent(uid)?;
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::DAILY_RECORDS)
            .parent(&parent_path)
            .obj()
            .one(day.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Write a daily record (document id = its day key).
    pub async fn set_daily_record(&self, uid: &str, record: &DailyRecord) -> Result<(), AppError> {
        let parent_path = self.daily_records_parent(uid)?;
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::DAILY_RECORDS)
            .document_id(record.date.to_string())
            .parent(&parent_path)
            .object(record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get all records with `date` in `[start, end]`, ascending.
    ///
    /// Day keys order lexicographically as dates, so a string range filter is
    /// a date range filter.
    pub async fn get_daily_records_in_range(
        &self,
        uid: &str,
        start: DayKey,
        end: DayKey,
    ) -> Result<Vec<DailyRecord>, AppError> {
        let parent_path = self.daily_records_parent(uid)?;
        let start_key = start.to_string();
        let end_key = end.to_string();

        self.get_client()?
            .fluent()
            .select()
            .from(collections::DAILY_RECORDS)
            .parent(&parent_path)
            .filter(move |q| {
                q.for_all([
                    q.field("date").greater_than_or_equal(start_key.clone()),
                    q.field("date").less_than_or_equal(end_key.clone()),
                ])
            })
            .order_by([("date", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Leaderboard Queries ─────────────────────────────────────

    /// Users ordered by `current_streak` descending.
    ///
    /// Ordering between equal streak values is whatever stable order
    /// Firestore returns.
    pub async fn users_by_streak(&self, limit: Option<u32>) -> Result<Vec<User>, AppError> {
        let query = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .order_by([(
                "current_streak",
                firestore::FirestoreQueryDirection::Descending,
            )]);

        let query = if let Some(limit) = limit {
            query.limit(limit)
        } else {
            query
        };

        query
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Atomic Intake Accrual ───────────────────────────────────

    /// Atomically append an intake entry and, when the goal threshold is
    /// crossed, advance the streak.
    ///
    /// This method uses a Firestore transaction to ensure the record write
    /// and the streak write succeed or fail together. If another request
    /// modifies the same documents concurrently, Firestore retries the
    /// transaction with fresh data, preventing lost updates from concurrent
    /// intake submissions.
    ///
    /// Returns the new completion percentage.
    pub async fn add_intake_atomic(
        &self,
        uid: &str,
        day: DayKey,
        entry: WaterEntry,
        now: &str,
    ) -> Result<u32, AppError> {
        let client = self.get_client()?;
        let parent_path = self.daily_records_parent(uid)?;

        // Begin a transaction
        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        // 1. Read the day's record within the transaction
        //    This registers the document for conflict detection
        let current: Option<DailyRecord> = client
            .fluent()
            .select()
            .by_id_in(collections::DAILY_RECORDS)
            .parent(&parent_path)
            .obj()
            .one(day.to_string())
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to read record in transaction: {}", e))
            })?;

        // The add-drink path may run before the day's record was lazily
        // created; fall back to the default goal rather than failing.
        let mut record = current.unwrap_or_else(|| DailyRecord::with_default_goal(day, now));

        // 2. Accrue in memory
        let amount = entry.amount;
        record.apply_intake(entry, now);
        let percentage = record.percentage;

        // 3. If the goal was crossed, run the streak transition
        if record.goal_met() {
            let user: Option<User> = client
                .fluent()
                .select()
                .by_id_in(collections::USERS)
                .obj()
                .one(uid)
                .await
                .map_err(|e| {
                    AppError::Database(format!("Failed to read user in transaction: {}", e))
                })?;

            let state = user.map(|u| u.streak_state()).unwrap_or_default();
            if let Some(next) = state.advance(day) {
                client
                    .fluent()
                    .update()
                    .fields(paths!(StreakState::{current_streak, last_streak_update}))
                    .in_col(collections::USERS)
                    .document_id(uid)
                    .object(&next)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!("Failed to add streak to transaction: {}", e))
                    })?;

                tracing::info!(
                    user = uid,
                    streak = next.current_streak,
                    day = %day,
                    "Streak advanced"
                );
            }
        }

        // 4. Add the record write to the transaction
        client
            .fluent()
            .update()
            .in_col(collections::DAILY_RECORDS)
            .document_id(day.to_string())
            .parent(&parent_path)
            .object(&record)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add record to transaction: {}", e))
            })?;

        // 5. Commit the transaction atomically
        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::debug!(
            user = uid,
            day = %day,
            amount,
            percentage,
            "Intake recorded atomically"
        );

        Ok(percentage)
    }

    // ─── User Data Deletion ──────────────────────────────────────

    /// Delete ALL data for a user (account-deletion cascade).
    ///
    /// Deletes every document in `users/{uid}/dailyRecords`, then the user
    /// document itself. Uses concurrent deletes with a limit to avoid
    /// overloading Firestore.
    ///
    /// Returns the number of documents deleted.
    pub async fn delete_user_data(&self, uid: &str) -> Result<usize, AppError> {
        let client = self.get_client()?;
        let parent_path = self.daily_records_parent(uid)?;

        // 1. Delete all daily records
        let records: Vec<DailyRecord> = client
            .fluent()
            .select()
            .from(collections::DAILY_RECORDS)
            .parent(&parent_path)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let count = records.len();

        let parent_ref = &parent_path;
        stream::iter(records)
            .map(|record| async move {
                client
                    .fluent()
                    .delete()
                    .from(collections::DAILY_RECORDS)
                    .parent(parent_ref)
                    .document_id(record.date.to_string())
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok::<_, AppError>(())
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<()>, AppError>>()?;

        tracing::debug!(user = uid, count, "Deleted daily records");

        // 2. Delete user document
        client
            .fluent()
            .delete()
            .from(collections::USERS)
            .document_id(uid)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let deleted_count = count + 1;
        tracing::info!(user = uid, deleted_count, "User data deletion complete");

        Ok(deleted_count)
    }
}
