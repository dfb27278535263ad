use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, LeaderboardQuery};
use crate::domain::{LeaderboardRow, RelativeLeaderboardRow, SortKey};
use crate::services::LeaderboardError;

impl From<LeaderboardError> for ApiError {
    fn from(err: LeaderboardError) -> Self {
        match err {
            LeaderboardError::Database(msg) => Self::DatabaseError(msg),
            LeaderboardError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// GET /api/leaderboard?sort=total|bench|squat|deadlift
pub async fn absolute(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LeaderboardQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<LeaderboardRow>>>, ApiError> {
    let Query(query) = query?;

    let sort = match query.sort.as_deref() {
        None | Some("") => SortKey::default(),
        Some(raw) => raw.parse::<SortKey>().map_err(ApiError::validation)?,
    };

    let rows = state.leaderboard_service().absolute(sort).await?;
    Ok(Json(ApiResponse::success(rows)))
}

/// GET /api/leaderboard/relative
pub async fn relative(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<RelativeLeaderboardRow>>>, ApiError> {
    let rows = state.leaderboard_service().relative().await?;
    Ok(Json(ApiResponse::success(rows)))
}
