//! `SeaORM` implementation of the `WorkoutService` trait.

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::db::Store;
use crate::domain::{HistoryEntry, PersonalRecords, UserId, WorkoutLog, WorkoutSession};
use crate::services::workout_service::{LoggedWorkout, WorkoutError, WorkoutService};

const MAX_RECORD_LEN: usize = 32;

pub struct SeaOrmWorkoutService {
    store: Store,
}

impl SeaOrmWorkoutService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Runs derivation for an already stored workout. Failures are logged
    /// and reported as "nothing improved".
    async fn raise_records(&self, user_id: UserId, log: &WorkoutLog) -> Vec<String> {
        match self
            .store
            .merge_workout_into_records(user_id, &log.exercises)
            .await
        {
            Ok(Some(update)) => {
                let improved: Vec<String> =
                    update.improved.iter().map(ToString::to_string).collect();

                metrics::counter!("personal_records_updated_total")
                    .increment(improved.len() as u64);
                info!(
                    user_id = %user_id,
                    lifts = ?improved,
                    bench = %update.records.bench,
                    squat = %update.records.squat,
                    deadlift = %update.records.deadlift,
                    "Personal records raised"
                );

                improved
            }
            Ok(None) => {
                debug!(user_id = %user_id, "Workout beat no personal records");
                Vec::new()
            }
            Err(e) => {
                error!(
                    user_id = %user_id,
                    error = %e,
                    "Personal record update failed; workout was still saved"
                );
                Vec::new()
            }
        }
    }
}

/// Trims a submitted record value; blank means 0.
fn normalize_record(lift: &str, raw: &str) -> Result<String, WorkoutError> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok("0".to_string());
    }

    if value.len() > MAX_RECORD_LEN {
        return Err(WorkoutError::Validation(format!(
            "{lift} must be {MAX_RECORD_LEN} characters or less"
        )));
    }

    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(value.to_string()),
        _ => Err(WorkoutError::Validation(format!(
            "{lift} must be a non-negative number, got '{value}'"
        ))),
    }
}

#[async_trait]
impl WorkoutService for SeaOrmWorkoutService {
    async fn get_routine(&self, user_id: UserId) -> Result<Vec<WorkoutSession>, WorkoutError> {
        Ok(self.store.get_routine(user_id).await?.unwrap_or_default())
    }

    async fn save_routine(
        &self,
        user_id: UserId,
        sessions: Vec<WorkoutSession>,
    ) -> Result<(), WorkoutError> {
        self.store.save_routine(user_id, &sessions).await?;
        debug!(user_id = %user_id, sessions = sessions.len(), "Routine saved");
        Ok(())
    }

    async fn get_records(&self, user_id: UserId) -> Result<PersonalRecords, WorkoutError> {
        Ok(self
            .store
            .get_personal_records(user_id)
            .await?
            .unwrap_or_default())
    }

    async fn save_records(
        &self,
        user_id: UserId,
        records: PersonalRecords,
    ) -> Result<PersonalRecords, WorkoutError> {
        let records = PersonalRecords {
            bench: normalize_record("bench", &records.bench)?,
            squat: normalize_record("squat", &records.squat)?,
            deadlift: normalize_record("deadlift", &records.deadlift)?,
        };

        self.store
            .overwrite_personal_records(user_id, &records)
            .await?;
        info!(user_id = %user_id, "Personal records overwritten");

        Ok(records)
    }

    async fn list_history(&self, user_id: UserId) -> Result<Vec<HistoryEntry>, WorkoutError> {
        Ok(self.store.list_history(user_id).await?)
    }

    async fn log_workout(
        &self,
        user_id: UserId,
        log: WorkoutLog,
    ) -> Result<LoggedWorkout, WorkoutError> {
        let entry = self.store.add_history(user_id, &log).await?;
        metrics::counter!("workouts_logged_total").increment(1);
        info!(
            user_id = %user_id,
            history_id = entry.id,
            title = %entry.workout_title,
            exercises = entry.exercises.len(),
            "Workout logged"
        );

        let records_updated = self.raise_records(user_id, &log).await;

        Ok(LoggedWorkout {
            id: entry.id,
            records_updated,
        })
    }
}
