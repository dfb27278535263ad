//! Settings and profile endpoints.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::db::User;
use crate::domain::{UserProfile, UserSettings};
use crate::services::AccountError;

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(id) => Self::NotFound(format!("User {id} not found")),
            AccountError::Validation(msg) => Self::validation(msg),
            AccountError::Database(msg) => Self::DatabaseError(msg),
            AccountError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// GET /api/settings
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<ApiResponse<UserSettings>>, ApiError> {
    let settings = state.account_service().get_settings(user.id).await?;
    Ok(Json(ApiResponse::success(settings)))
}

/// POST /api/settings
pub async fn save_settings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    payload: Result<Json<UserSettings>, JsonRejection>,
) -> Result<Json<ApiResponse<UserSettings>>, ApiError> {
    let Json(settings) = payload?;
    let saved = state
        .account_service()
        .save_settings(user.id, settings)
        .await?;
    Ok(Json(ApiResponse::success(saved)))
}

/// GET /api/profile
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let profile = state.account_service().get_profile(user.id).await?;
    Ok(Json(ApiResponse::success(profile)))
}

/// POST /api/profile
pub async fn save_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    payload: Result<Json<UserProfile>, JsonRejection>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let Json(profile) = payload?;
    let saved = state
        .account_service()
        .save_profile(user.id, profile)
        .await?;
    Ok(Json(ApiResponse::success(saved)))
}
