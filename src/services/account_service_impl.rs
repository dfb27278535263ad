//! `SeaORM` implementation of the `AccountService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::{Store, User};
use crate::domain::{UserId, UserProfile, UserSettings};
use crate::services::account_service::{AccountError, AccountService};

const MAX_THEME_LEN: usize = 32;
const MAX_PROFILE_FIELD_LEN: usize = 64;
const MAX_AGE: i32 = 150;

pub struct SeaOrmAccountService {
    store: Store,
}

impl SeaOrmAccountService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn user(&self, user_id: UserId) -> Result<User, AccountError> {
        self.store
            .get_user(user_id)
            .await?
            .ok_or(AccountError::NotFound(user_id))
    }
}

fn validate_profile(profile: &UserProfile) -> Result<(), AccountError> {
    let text_fields = [
        ("height", &profile.height),
        ("weight", &profile.weight),
        ("gender", &profile.gender),
        ("fitness_goal", &profile.fitness_goal),
    ];

    for (name, value) in text_fields {
        if value
            .as_ref()
            .is_some_and(|v| v.chars().count() > MAX_PROFILE_FIELD_LEN)
        {
            return Err(AccountError::Validation(format!(
                "{name} must be {MAX_PROFILE_FIELD_LEN} characters or less"
            )));
        }
    }

    if let Some(age) = profile.age
        && !(0..=MAX_AGE).contains(&age)
    {
        return Err(AccountError::Validation(format!(
            "Invalid age: {age}. Age must be between 0 and {MAX_AGE}"
        )));
    }

    Ok(())
}

#[async_trait]
impl AccountService for SeaOrmAccountService {
    async fn get_settings(&self, user_id: UserId) -> Result<UserSettings, AccountError> {
        Ok(self.user(user_id).await?.settings)
    }

    async fn save_settings(
        &self,
        user_id: UserId,
        settings: UserSettings,
    ) -> Result<UserSettings, AccountError> {
        if settings
            .theme
            .as_ref()
            .is_some_and(|t| t.chars().count() > MAX_THEME_LEN)
        {
            return Err(AccountError::Validation(format!(
                "Theme must be {MAX_THEME_LEN} characters or less"
            )));
        }

        // Existence check first so a deleted account reads as 404, not 500.
        self.user(user_id).await?;
        let user = self.store.update_user_settings(user_id, &settings).await?;

        info!(
            user_id = %user_id,
            is_load_out = user.settings.is_load_out,
            theme = ?user.settings.theme,
            "Settings updated"
        );
        Ok(user.settings)
    }

    async fn get_profile(&self, user_id: UserId) -> Result<UserProfile, AccountError> {
        Ok(self.user(user_id).await?.profile)
    }

    async fn save_profile(
        &self,
        user_id: UserId,
        profile: UserProfile,
    ) -> Result<UserProfile, AccountError> {
        validate_profile(&profile)?;

        self.user(user_id).await?;
        let user = self.store.update_user_profile(user_id, &profile).await?;

        info!(user_id = %user_id, "Profile updated");
        Ok(user.profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_limits() {
        assert!(validate_profile(&UserProfile::default()).is_ok());

        let profile = UserProfile {
            age: Some(200),
            ..UserProfile::default()
        };
        assert!(validate_profile(&profile).is_err());

        let profile = UserProfile {
            fitness_goal: Some("x".repeat(65)),
            ..UserProfile::default()
        };
        assert!(validate_profile(&profile).is_err());

        let profile = UserProfile {
            height: Some("180".to_string()),
            weight: Some("82.5".to_string()),
            age: Some(29),
            gender: Some("female".to_string()),
            fitness_goal: Some("strength".to_string()),
        };
        assert!(validate_profile(&profile).is_ok());
    }
}
