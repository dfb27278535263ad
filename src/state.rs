use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AccountService, AuthService, CredentialService, LeaderboardService, SeaOrmAccountService,
    SeaOrmAuthService, SeaOrmLeaderboardService, SeaOrmWorkoutService, WorkoutService,
};

/// Everything a request handler may need, built once at startup.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub credentials: Arc<CredentialService>,

    pub auth_service: Arc<dyn AuthService>,

    pub workout_service: Arc<dyn WorkoutService>,

    pub account_service: Arc<dyn AccountService>,

    pub leaderboard_service: Arc<dyn LeaderboardService>,
}

impl SharedState {
    /// Connects to the database, applies migrations and wires the services.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Store) -> anyhow::Result<Self> {
        let credentials = Arc::new(CredentialService::new(&config.security)?);

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            credentials.clone(),
            config.security.min_password_length,
        )) as Arc<dyn AuthService>;

        let workout_service = Arc::new(SeaOrmWorkoutService::new(store.clone()))
            as Arc<dyn WorkoutService>;

        let account_service = Arc::new(SeaOrmAccountService::new(store.clone()))
            as Arc<dyn AccountService>;

        let leaderboard_service = Arc::new(SeaOrmLeaderboardService::new(store.clone()))
            as Arc<dyn LeaderboardService>;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            credentials,
            auth_service,
            workout_service,
            account_service,
            leaderboard_service,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
