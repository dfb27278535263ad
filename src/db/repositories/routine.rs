use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::{UserId, WorkoutSession};
use crate::entities::{prelude::*, routines};

pub struct RoutineRepository {
    conn: DatabaseConnection,
}

impl RoutineRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, user_id: UserId) -> Result<Option<Vec<WorkoutSession>>> {
        let row = Routines::find()
            .filter(routines::Column::UserId.eq(user_id.value()))
            .one(&self.conn)
            .await
            .context("Failed to query routine")?;

        row.map(|r| {
            serde_json::from_str(&r.data)
                .with_context(|| format!("Stored routine for user {user_id} is not valid JSON"))
        })
        .transpose()
    }

    /// Replaces the user's routine wholesale.
    pub async fn save(&self, user_id: UserId, sessions: &[WorkoutSession]) -> Result<()> {
        let data = serde_json::to_string(sessions)?;
        let now = chrono::Utc::now().to_rfc3339();

        let row = routines::ActiveModel {
            user_id: Set(user_id.value()),
            data: Set(data),
            updated_at: Set(now),
            ..Default::default()
        };

        Routines::insert(row)
            .on_conflict(
                OnConflict::column(routines::Column::UserId)
                    .update_columns([routines::Column::Data, routines::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to save routine")?;

        Ok(())
    }
}
