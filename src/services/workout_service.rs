//! Domain service for a user's training data: routine, personal records and
//! workout history.
//!
//! Logging a workout is a two-step operation. The history row is committed
//! first; personal-record derivation runs afterwards and its failures never
//! undo or fail the log.

use serde::Serialize;
use thiserror::Error;

use crate::domain::{HistoryEntry, PersonalRecords, UserId, WorkoutLog, WorkoutSession};

/// Errors specific to workout operations.
#[derive(Debug, Error)]
pub enum WorkoutError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for WorkoutError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for WorkoutError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Outcome of logging a workout.
#[derive(Debug, Clone, Serialize)]
pub struct LoggedWorkout {
    pub id: i32,

    /// Lifts whose record this workout beat, e.g. `["squat"]`.
    pub records_updated: Vec<String>,
}

/// Domain service trait for training data.
#[async_trait::async_trait]
pub trait WorkoutService: Send + Sync {
    /// The saved routine, or an empty list if none was saved yet.
    async fn get_routine(&self, user_id: UserId) -> Result<Vec<WorkoutSession>, WorkoutError>;

    /// Replaces the routine wholesale.
    async fn save_routine(
        &self,
        user_id: UserId,
        sessions: Vec<WorkoutSession>,
    ) -> Result<(), WorkoutError>;

    /// Current records, all `"0"` when none exist.
    async fn get_records(&self, user_id: UserId) -> Result<PersonalRecords, WorkoutError>;

    /// Overwrites the records as given. Lowering a record is allowed here.
    ///
    /// # Errors
    ///
    /// Returns [`WorkoutError::Validation`] if a value is not a non-negative
    /// number.
    async fn save_records(
        &self,
        user_id: UserId,
        records: PersonalRecords,
    ) -> Result<PersonalRecords, WorkoutError>;

    /// History in insertion order.
    async fn list_history(&self, user_id: UserId) -> Result<Vec<HistoryEntry>, WorkoutError>;

    /// Appends a workout and raises any personal records it beats.
    ///
    /// # Errors
    ///
    /// Only fails when the history row itself cannot be stored.
    async fn log_workout(
        &self,
        user_id: UserId,
        log: WorkoutLog,
    ) -> Result<LoggedWorkout, WorkoutError>;
}
