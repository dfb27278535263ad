use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::warn;

use crate::domain::{ExerciseLog, HistoryEntry, UserId, WorkoutLog};
use crate::entities::{prelude::*, workout_history};

impl From<workout_history::Model> for HistoryEntry {
    fn from(model: workout_history::Model) -> Self {
        let exercises: Vec<ExerciseLog> = serde_json::from_str(&model.exercises)
            .unwrap_or_else(|e| {
                warn!(history_id = model.id, error = %e, "Unreadable exercise log in history row");
                Vec::new()
            });

        Self {
            id: model.id,
            workout_title: model.workout_title,
            date: model.date,
            timestamp: model.timestamp,
            exercises,
            is_load_out: model.is_load_out,
            created_at: model.created_at,
        }
    }
}

pub struct HistoryRepository {
    conn: DatabaseConnection,
}

impl HistoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, user_id: UserId, log: &WorkoutLog) -> Result<HistoryEntry> {
        let exercises = serde_json::to_string(&log.exercises)?;

        let model = workout_history::ActiveModel {
            user_id: Set(user_id.value()),
            workout_title: Set(log.workout_title.clone()),
            date: Set(log.date.clone()),
            timestamp: Set(log.timestamp),
            exercises: Set(exercises),
            is_load_out: Set(log.is_load_out),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert workout history")?;

        Ok(HistoryEntry::from(model))
    }

    /// Oldest first.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<HistoryEntry>> {
        let rows = WorkoutHistory::find()
            .filter(workout_history::Column::UserId.eq(user_id.value()))
            .order_by_asc(workout_history::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query workout history")?;

        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }
}
