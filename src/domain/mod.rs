//! Domain types for training data with strong typing.
//!
//! This module holds the store-independent core: the typed workout payloads,
//! personal-record derivation and leaderboard ranking. Nothing in here touches
//! the database, so every rule can be tested directly.

pub mod account;
pub mod leaderboard;
pub mod records;
pub mod workout;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use account::{DEFAULT_THEME, UserProfile, UserSettings};
pub use leaderboard::{
    LeaderboardRow, LiftTotals, RankSource, RelativeLeaderboardRow, SortKey, display_name,
    rank_by_bodyweight, rank_by_total,
};
pub use records::{PersonalRecords, RecordUpdate, derive_records, parse_lenient};
pub use workout::{
    ExerciseLog, HistoryEntry, MetricType, MetricValue, RoutineExercise, SetRecord, WorkoutLog,
    WorkoutSession,
};

/// Unique identifier for a User in the system.
///
/// This newtype wrapper prevents mixing user IDs with the IDs of the rows
/// they own (routines, records, history entries).
///
/// # Examples
///
/// ```rust
/// use ubgym::domain::UserId;
///
/// let id = UserId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UserId(i32);

impl UserId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        debug_assert!(id >= 0, "UserId should be non-negative");
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i32 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl Serialize for UserId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i32::deserialize(deserializer)?;
        Ok(Self::new(id))
    }
}

/// The three tracked lift categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lift {
    Bench,
    Squat,
    Deadlift,
}

impl Lift {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bench => "bench",
            Self::Squat => "squat",
            Self::Deadlift => "deadlift",
        }
    }

    /// Categories an exercise name counts towards.
    ///
    /// Matching is case-insensitive substring matching, except that a bare
    /// "bench" only counts when it is the whole name, so accessories such as
    /// "Bench Dips" stay untracked. One name can match several categories.
    #[must_use]
    pub fn classify(exercise_name: &str) -> Vec<Self> {
        let name = exercise_name.to_lowercase();
        let mut lifts = Vec::new();

        if name.contains("bench press") || name == "bench" {
            lifts.push(Self::Bench);
        }
        if name.contains("squat") {
            lifts.push(Self::Squat);
        }
        if name.contains("deadlift") {
            lifts.push(Self::Deadlift);
        }

        lifts
    }
}

impl fmt::Display for Lift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
