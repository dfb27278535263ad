//! Domain service for per-user settings and profile attributes.

use thiserror::Error;

use crate::domain::{UserId, UserProfile, UserSettings};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AccountError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    async fn get_settings(&self, user_id: UserId) -> Result<UserSettings, AccountError>;

    /// Stores the load-out flag. The theme is only replaced when a non-empty
    /// one is supplied.
    async fn save_settings(
        &self,
        user_id: UserId,
        settings: UserSettings,
    ) -> Result<UserSettings, AccountError>;

    async fn get_profile(&self, user_id: UserId) -> Result<UserProfile, AccountError>;

    /// Replaces all five profile attributes; omitted ones are cleared.
    async fn save_profile(
        &self,
        user_id: UserId,
        profile: UserProfile,
    ) -> Result<UserProfile, AccountError>;
}
