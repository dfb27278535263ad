use crate::domain::{
    ExerciseLog, HistoryEntry, PersonalRecords, RecordUpdate, UserId, UserProfile, UserSettings,
    WorkoutLog, WorkoutSession,
};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    /// Connects and applies pending migrations.
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        let store = Self::connect(db_url, max_connections, min_connections).await?;
        let applied = store.migrate().await?;

        info!(
            "Database connected & {} migration(s) applied (pool: {}-{})",
            applied, min_connections, max_connections
        );

        Ok(store)
    }

    /// Connects without touching the schema.
    pub async fn connect(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        if db_url.starts_with("sqlite:") && !db_url.contains(":memory:") {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        Ok(Self { conn })
    }

    /// Applies every pending migration in order and returns how many ran.
    pub async fn migrate(&self) -> Result<usize> {
        let pending = migrator::Migrator::get_pending_migrations(&self.conn)
            .await?
            .len();
        migrator::Migrator::up(&self.conn, None).await?;
        Ok(pending)
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn routine_repo(&self) -> repositories::routine::RoutineRepository {
        repositories::routine::RoutineRepository::new(self.conn.clone())
    }

    fn records_repo(&self) -> repositories::records::RecordsRepository {
        repositories::records::RecordsRepository::new(self.conn.clone())
    }

    fn history_repo(&self) -> repositories::history::HistoryRepository {
        repositories::history::HistoryRepository::new(self.conn.clone())
    }

    pub async fn resolve_identity(&self, identity: &str) -> Result<Option<User>> {
        self.user_repo().resolve_identity(identity).await
    }

    pub async fn resolve_identity_with_password(
        &self,
        identity: &str,
    ) -> Result<Option<(User, String)>> {
        self.user_repo()
            .resolve_identity_with_password(identity)
            .await
    }

    pub async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        self.user_repo().username_exists(username).await
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        self.user_repo().email_exists(email).await
    }

    pub async fn create_user(
        &self,
        username: &str,
        email: Option<&str>,
        password_hash: String,
    ) -> Result<User> {
        self.user_repo()
            .create(username, email, password_hash)
            .await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list_all().await
    }

    pub async fn update_user_settings(&self, id: UserId, settings: &UserSettings) -> Result<User> {
        self.user_repo().update_settings(id, settings).await
    }

    pub async fn update_user_profile(&self, id: UserId, profile: &UserProfile) -> Result<User> {
        self.user_repo().update_profile(id, profile).await
    }

    pub async fn get_routine(&self, user_id: UserId) -> Result<Option<Vec<WorkoutSession>>> {
        self.routine_repo().get(user_id).await
    }

    pub async fn save_routine(&self, user_id: UserId, sessions: &[WorkoutSession]) -> Result<()> {
        self.routine_repo().save(user_id, sessions).await
    }

    pub async fn get_personal_records(&self, user_id: UserId) -> Result<Option<PersonalRecords>> {
        self.records_repo().get(user_id).await
    }

    pub async fn list_personal_records(&self) -> Result<Vec<(UserId, PersonalRecords)>> {
        self.records_repo().list_all().await
    }

    pub async fn overwrite_personal_records(
        &self,
        user_id: UserId,
        records: &PersonalRecords,
    ) -> Result<()> {
        self.records_repo().overwrite(user_id, records).await
    }

    pub async fn merge_workout_into_records(
        &self,
        user_id: UserId,
        exercises: &[ExerciseLog],
    ) -> Result<Option<RecordUpdate>> {
        self.records_repo().merge_workout(user_id, exercises).await
    }

    pub async fn add_history(&self, user_id: UserId, log: &WorkoutLog) -> Result<HistoryEntry> {
        self.history_repo().add(user_id, log).await
    }

    pub async fn list_history(&self, user_id: UserId) -> Result<Vec<HistoryEntry>> {
        self.history_repo().list(user_id).await
    }
}
