//! `SeaORM` implementation of the `AuthService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DbErr, SqlErr};
use tracing::{info, warn};

use crate::db::{Store, User};
use crate::services::auth_service::{AuthError, AuthService, Registration, TokenGrant};
use crate::services::credentials::CredentialService;

pub struct SeaOrmAuthService {
    store: Store,
    credentials: Arc<CredentialService>,
    min_password_length: usize,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(
        store: Store,
        credentials: Arc<CredentialService>,
        min_password_length: usize,
    ) -> Self {
        Self {
            store,
            credentials,
            min_password_length,
        }
    }

    fn grant_for(&self, user: &User) -> Result<TokenGrant, AuthError> {
        let subject = user
            .token_subject()
            .ok_or_else(|| AuthError::Internal(format!("User {} has no identity", user.id)))?;

        Ok(TokenGrant::bearer(
            self.credentials.issue_token(subject, None)?,
        ))
    }
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<DbErr>()
        .and_then(DbErr::sql_err)
        .is_some_and(|e| matches!(e, SqlErr::UniqueConstraintViolation(_)))
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, registration: Registration) -> Result<TokenGrant, AuthError> {
        let Registration {
            username,
            password,
            email,
        } = registration;

        if password.chars().count() < self.min_password_length.max(1) {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                self.min_password_length.max(1)
            )));
        }

        if self.store.username_exists(&username).await? {
            return Err(AuthError::UsernameTaken);
        }

        if let Some(email) = email.as_deref()
            && self.store.email_exists(email).await?
        {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = self.credentials.hash(&password).await?;

        let user = match self
            .store
            .create_user(&username, email.as_deref(), password_hash)
            .await
        {
            Ok(user) => user,
            Err(e) if is_unique_violation(&e) => {
                warn!(username = %username, "Registration lost a unique-index race");
                return Err(AuthError::AlreadyRegistered);
            }
            Err(e) => return Err(e.into()),
        };

        info!(user_id = %user.id, username = %username, "User registered");
        self.grant_for(&user)
    }

    async fn login(&self, identity: &str, password: &str) -> Result<TokenGrant, AuthError> {
        let Some((user, password_hash)) =
            self.store.resolve_identity_with_password(identity).await?
        else {
            return Err(AuthError::InvalidCredentials);
        };

        if !self.credentials.verify(password, &password_hash).await {
            return Err(AuthError::InvalidCredentials);
        }

        self.grant_for(&user)
    }

    async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let subject = self
            .credentials
            .validate_token(token)
            .ok_or(AuthError::InvalidToken)?;

        self.store
            .resolve_identity(&subject)
            .await?
            .ok_or(AuthError::InvalidToken)
    }
}
