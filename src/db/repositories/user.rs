use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DEFAULT_THEME, UserId, UserProfile, UserSettings};
use crate::entities::{prelude::*, users};

/// User data returned from repository (without sensitive password hash)
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Option<String>,
    pub email: Option<String>,
    pub settings: UserSettings,
    pub profile: UserProfile,
    pub created_at: String,
}

impl User {
    /// Subject written into bearer tokens. Rows without a username fall back
    /// to their email, which identity resolution also accepts.
    #[must_use]
    pub fn token_subject(&self) -> Option<&str> {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .or(self.email.as_deref())
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: UserId::new(model.id),
            username: model.username,
            email: model.email,
            settings: UserSettings {
                is_load_out: model.is_load_out,
                theme: Some(model.theme),
            },
            profile: UserProfile {
                height: model.height,
                weight: model.weight,
                age: model.age,
                gender: model.gender,
                fitness_goal: model.fitness_goal,
            },
            created_at: model.created_at,
        }
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn find_model_by_identity(&self, identity: &str) -> Result<Option<users::Model>> {
        let by_username = Users::find()
            .filter(users::Column::Username.eq(identity))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        if by_username.is_some() {
            return Ok(by_username);
        }

        Users::find()
            .filter(users::Column::Email.eq(identity))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")
    }

    /// Exact username match first, then exact email match.
    pub async fn resolve_identity(&self, identity: &str) -> Result<Option<User>> {
        Ok(self
            .find_model_by_identity(identity)
            .await?
            .map(User::from))
    }

    /// Same lookup as [`Self::resolve_identity`], keeping the stored hash for
    /// credential checks.
    pub async fn resolve_identity_with_password(
        &self,
        identity: &str,
    ) -> Result<Option<(User, String)>> {
        Ok(self.find_model_by_identity(identity).await?.map(|u| {
            let password_hash = u.password_hash.clone();
            (User::from(u), password_hash)
        }))
    }

    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>> {
        let user = Users::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let user = Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.is_some())
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let user = Users::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")?;

        Ok(user.is_some())
    }

    pub async fn create(
        &self,
        username: &str,
        email: Option<&str>,
        password_hash: String,
    ) -> Result<User> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = users::ActiveModel {
            username: Set(Some(username.to_string())),
            email: Set(email.map(str::to_string)),
            password_hash: Set(password_hash),
            is_load_out: Set(false),
            theme: Set(DEFAULT_THEME.to_string()),
            created_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(&self.conn).await?;
        Ok(User::from(model))
    }

    /// All users in id order, the enumeration order the leaderboard keeps
    /// for ties.
    pub async fn list_all(&self) -> Result<Vec<User>> {
        let users = Users::find()
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list users")?;

        Ok(users.into_iter().map(User::from).collect())
    }

    pub async fn update_settings(&self, id: UserId, settings: &UserSettings) -> Result<User> {
        let user = Users::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query user for settings update")?
            .ok_or_else(|| anyhow::anyhow!("User not found: {id}"))?;

        let mut active: users::ActiveModel = user.into();
        active.is_load_out = Set(settings.is_load_out);
        if let Some(theme) = settings.theme.as_ref().filter(|t| !t.is_empty()) {
            active.theme = Set(theme.clone());
        }

        Ok(User::from(active.update(&self.conn).await?))
    }

    pub async fn update_profile(&self, id: UserId, profile: &UserProfile) -> Result<User> {
        let user = Users::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query user for profile update")?
            .ok_or_else(|| anyhow::anyhow!("User not found: {id}"))?;

        let mut active: users::ActiveModel = user.into();
        active.height = Set(profile.height.clone());
        active.weight = Set(profile.weight.clone());
        active.age = Set(profile.age);
        active.gender = Set(profile.gender.clone());
        active.fitness_goal = Set(profile.fitness_goal.clone());

        Ok(User::from(active.update(&self.conn).await?))
    }
}
