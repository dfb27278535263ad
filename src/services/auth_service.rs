//! Domain service for registration, login and bearer-token authentication.

use serde::Serialize;
use thiserror::Error;

use crate::db::User;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Username already registered")]
    UsernameTaken,

    #[error("Email already registered")]
    EmailTaken,

    /// A concurrent registration won the unique index.
    #[error("Username or email already registered")]
    AlreadyRegistered,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Token response, shaped the way OAuth2 password-flow clients expect.
#[derive(Debug, Clone, Serialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub token_type: String,
}

impl TokenGrant {
    #[must_use]
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a user and signs a token for it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UsernameTaken`] or [`AuthError::EmailTaken`] when
    /// the identity is in use, [`AuthError::Validation`] for malformed input.
    async fn register(&self, registration: Registration) -> Result<TokenGrant, AuthError>;

    /// Resolves `identity` as a username, then as an email, and checks the
    /// password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, identity: &str, password: &str) -> Result<TokenGrant, AuthError>;

    /// Maps a bearer token to its user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for bad or expired tokens and for
    /// subjects that no longer resolve.
    async fn authenticate(&self, token: &str) -> Result<User, AuthError>;
}
