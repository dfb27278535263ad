use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

use crate::domain::{ExerciseLog, PersonalRecords, RecordUpdate, UserId, derive_records};
use crate::entities::personal_records;

impl From<&personal_records::Model> for PersonalRecords {
    fn from(model: &personal_records::Model) -> Self {
        Self {
            bench: model.bench.clone(),
            squat: model.squat.clone(),
            deadlift: model.deadlift.clone(),
        }
    }
}

pub struct RecordsRepository {
    conn: DatabaseConnection,
}

impl RecordsRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, user_id: UserId) -> Result<Option<PersonalRecords>> {
        let row = find_row(&self.conn, user_id).await?;
        Ok(row.as_ref().map(PersonalRecords::from))
    }

    /// Every stored record row, keyed by owner.
    pub async fn list_all(&self) -> Result<Vec<(UserId, PersonalRecords)>> {
        let rows = personal_records::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to list personal records")?;

        Ok(rows
            .iter()
            .map(|r| (UserId::new(r.user_id), PersonalRecords::from(r)))
            .collect())
    }

    /// Overwrites the stored records as given, without comparing against
    /// what is already there.
    pub async fn overwrite(&self, user_id: UserId, records: &PersonalRecords) -> Result<()> {
        upsert_row(&self.conn, user_id, records).await
    }

    /// Folds a workout into the user's records inside one transaction, so two
    /// workouts saved at once cannot overwrite each other's improvements.
    ///
    /// Returns the merged records when anything improved.
    pub async fn merge_workout(
        &self,
        user_id: UserId,
        exercises: &[ExerciseLog],
    ) -> Result<Option<RecordUpdate>> {
        let txn = self.conn.begin().await?;

        // SQLite transactions start deferred. Writing before reading takes the
        // write lock up front, so concurrent merges wait on the busy timeout
        // instead of failing at commit with a stale snapshot.
        claim_write_lock(&txn, user_id).await?;

        let existing = find_row(&txn, user_id).await?;
        let current = existing.as_ref().map(PersonalRecords::from);

        let Some(update) = derive_records(current.as_ref(), exercises) else {
            txn.rollback().await?;
            return Ok(None);
        };

        upsert_row(&txn, user_id, &update.records).await?;
        txn.commit().await?;

        Ok(Some(update))
    }
}

async fn find_row<C: ConnectionTrait>(
    conn: &C,
    user_id: UserId,
) -> Result<Option<personal_records::Model>> {
    personal_records::Entity::find()
        .filter(personal_records::Column::UserId.eq(user_id.value()))
        .one(conn)
        .await
        .context("Failed to query personal records")
}

/// No-op update on the user's row. It matches nothing for a first-time user
/// but still opens the write transaction.
async fn claim_write_lock<C: ConnectionTrait>(conn: &C, user_id: UserId) -> Result<()> {
    personal_records::Entity::update_many()
        .col_expr(
            personal_records::Column::UserId,
            Expr::col(personal_records::Column::UserId).into(),
        )
        .filter(personal_records::Column::UserId.eq(user_id.value()))
        .exec(conn)
        .await
        .context("Failed to lock personal records")?;
    Ok(())
}

/// Insert, or replace the lifts of, the user's single record row.
async fn upsert_row<C: ConnectionTrait>(
    conn: &C,
    user_id: UserId,
    records: &PersonalRecords,
) -> Result<()> {
    let row = personal_records::ActiveModel {
        user_id: Set(user_id.value()),
        bench: Set(records.bench.clone()),
        squat: Set(records.squat.clone()),
        deadlift: Set(records.deadlift.clone()),
        updated_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    };

    personal_records::Entity::insert(row)
        .on_conflict(
            OnConflict::column(personal_records::Column::UserId)
                .update_columns([
                    personal_records::Column::Bench,
                    personal_records::Column::Squat,
                    personal_records::Column::Deadlift,
                    personal_records::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .context("Failed to save personal records")?;

    Ok(())
}
