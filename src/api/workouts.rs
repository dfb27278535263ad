//! Routine, personal-record and history endpoints.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::db::User;
use crate::domain::{HistoryEntry, PersonalRecords, WorkoutLog, WorkoutSession};
use crate::services::{LoggedWorkout, WorkoutError};

impl From<WorkoutError> for ApiError {
    fn from(err: WorkoutError) -> Self {
        match err {
            WorkoutError::Validation(msg) => Self::validation(msg),
            WorkoutError::Database(msg) => Self::DatabaseError(msg),
            WorkoutError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// GET /api/routine
pub async fn get_routine(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<ApiResponse<Vec<WorkoutSession>>>, ApiError> {
    let routine = state.workout_service().get_routine(user.id).await?;
    Ok(Json(ApiResponse::success(routine)))
}

/// POST /api/routine
pub async fn save_routine(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    payload: Result<Json<Vec<WorkoutSession>>, JsonRejection>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let Json(sessions) = payload?;

    state
        .workout_service()
        .save_routine(user.id, sessions)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Routine saved",
    ))))
}

/// GET /api/prs
pub async fn get_records(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<ApiResponse<PersonalRecords>>, ApiError> {
    let records = state.workout_service().get_records(user.id).await?;
    Ok(Json(ApiResponse::success(records)))
}

/// POST /api/prs
/// Direct overwrite; unlike logged workouts this may lower a record.
pub async fn save_records(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    payload: Result<Json<PersonalRecords>, JsonRejection>,
) -> Result<Json<ApiResponse<PersonalRecords>>, ApiError> {
    let Json(records) = payload?;
    let saved = state
        .workout_service()
        .save_records(user.id, records)
        .await?;
    Ok(Json(ApiResponse::success(saved)))
}

/// GET /api/history
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<ApiResponse<Vec<HistoryEntry>>>, ApiError> {
    let history = state.workout_service().list_history(user.id).await?;
    Ok(Json(ApiResponse::success(history)))
}

/// POST /api/history
pub async fn log_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    payload: Result<Json<WorkoutLog>, JsonRejection>,
) -> Result<Json<ApiResponse<LoggedWorkout>>, ApiError> {
    let Json(log) = payload?;
    let logged = state.workout_service().log_workout(user.id, log).await?;
    Ok(Json(ApiResponse::success(logged)))
}
