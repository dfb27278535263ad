//! Leaderboard projections over every user's records and bodyweight.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::db::Store;
use crate::domain::{
    LeaderboardRow, RankSource, RelativeLeaderboardRow, SortKey, rank_by_bodyweight,
    rank_by_total,
};

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for LeaderboardError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for LeaderboardError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait]
pub trait LeaderboardService: Send + Sync {
    /// Users ranked by the sum of their three lifts, or by one lift.
    async fn absolute(&self, sort: SortKey) -> Result<Vec<LeaderboardRow>, LeaderboardError>;

    /// Users ranked by average lift per unit of bodyweight.
    async fn relative(&self) -> Result<Vec<RelativeLeaderboardRow>, LeaderboardError>;
}

pub struct SeaOrmLeaderboardService {
    store: Store,
}

impl SeaOrmLeaderboardService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// One source per user in id order. Users without a record row rank
    /// with zeros.
    async fn sources(&self) -> Result<Vec<RankSource>, LeaderboardError> {
        let users = self.store.list_users().await?;
        let mut records: HashMap<_, _> = self
            .store
            .list_personal_records()
            .await?
            .into_iter()
            .collect();

        debug!(
            users = users.len(),
            with_records = records.len(),
            "Building leaderboard"
        );

        Ok(users
            .into_iter()
            .map(|user| RankSource {
                records: records.remove(&user.id),
                bodyweight: user.profile.weight,
                username: user.username,
                email: user.email,
            })
            .collect())
    }
}

#[async_trait]
impl LeaderboardService for SeaOrmLeaderboardService {
    async fn absolute(&self, sort: SortKey) -> Result<Vec<LeaderboardRow>, LeaderboardError> {
        Ok(rank_by_total(&self.sources().await?, sort))
    }

    async fn relative(&self) -> Result<Vec<RelativeLeaderboardRow>, LeaderboardError> {
        Ok(rank_by_bodyweight(&self.sources().await?))
    }
}
