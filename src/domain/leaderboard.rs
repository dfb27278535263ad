//! Leaderboard ranking.
//!
//! Two rankings are offered: absolute (sum of the three lifts) and relative
//! (average lift divided by bodyweight). Both sorts are stable, so users with
//! equal scores keep the order they were enumerated in.

use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;

use super::Lift;
use super::records::{PersonalRecords, parse_lenient};

/// Everything the ranking needs to know about one user.
#[derive(Debug, Clone, Default)]
pub struct RankSource {
    pub username: Option<String>,
    pub email: Option<String>,
    pub records: Option<PersonalRecords>,
    pub bodyweight: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LiftTotals {
    pub bench: f64,
    pub squat: f64,
    pub deadlift: f64,
}

impl LiftTotals {
    /// Missing records read as all zero.
    #[must_use]
    pub fn from_records(records: Option<&PersonalRecords>) -> Self {
        records.map_or_else(Self::default, |r| Self {
            bench: r.value(Lift::Bench),
            squat: r.value(Lift::Squat),
            deadlift: r.value(Lift::Deadlift),
        })
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.bench + self.squat + self.deadlift
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub username: String,
    pub bench: f64,
    pub squat: f64,
    pub deadlift: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelativeLeaderboardRow {
    pub username: String,
    pub bench: f64,
    pub squat: f64,
    pub deadlift: f64,
    pub bodyweight_ratio: f64,
}

/// Column the absolute leaderboard is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Total,
    Bench,
    Squat,
    Deadlift,
}

impl SortKey {
    fn key(self, row: &LeaderboardRow) -> f64 {
        match self {
            Self::Total => row.total,
            Self::Bench => row.bench,
            Self::Squat => row.squat,
            Self::Deadlift => row.deadlift,
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "total" => Ok(Self::Total),
            "bench" => Ok(Self::Bench),
            "squat" => Ok(Self::Squat),
            "deadlift" => Ok(Self::Deadlift),
            other => Err(format!(
                "Unknown sort field '{other}'. Expected one of: total, bench, squat, deadlift"
            )),
        }
    }
}

/// Name shown on the board: username, else the local part of the email,
/// else "Anonymous". Blank values count as missing.
#[must_use]
pub fn display_name(username: Option<&str>, email: Option<&str>) -> String {
    if let Some(name) = username.filter(|u| !u.is_empty()) {
        return name.to_string();
    }

    if let Some(email) = email.filter(|e| !e.is_empty()) {
        let local = email.split('@').next().unwrap_or(email);
        return local.to_string();
    }

    "Anonymous".to_string()
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Absolute ranking, highest first on `sort`.
#[must_use]
pub fn rank_by_total(sources: &[RankSource], sort: SortKey) -> Vec<LeaderboardRow> {
    let mut rows: Vec<LeaderboardRow> = sources
        .iter()
        .map(|source| {
            let lifts = LiftTotals::from_records(source.records.as_ref());
            LeaderboardRow {
                username: display_name(source.username.as_deref(), source.email.as_deref()),
                bench: lifts.bench,
                squat: lifts.squat,
                deadlift: lifts.deadlift,
                total: lifts.total(),
            }
        })
        .collect();

    rows.sort_by(|a, b| descending(sort.key(a), sort.key(b)));
    rows
}

/// Average of the three lifts per unit of bodyweight, rounded to two
/// decimals. Unknown or non-positive bodyweight gives 0.
#[must_use]
pub fn bodyweight_ratio(lifts: &LiftTotals, bodyweight: Option<&str>) -> f64 {
    let bodyweight = bodyweight.map_or(0.0, parse_lenient);
    if bodyweight <= 0.0 {
        return 0.0;
    }

    let ratio = (lifts.total() / 3.0) / bodyweight;
    (ratio * 100.0).round() / 100.0
}

/// Relative ranking, highest ratio first.
#[must_use]
pub fn rank_by_bodyweight(sources: &[RankSource]) -> Vec<RelativeLeaderboardRow> {
    let mut rows: Vec<RelativeLeaderboardRow> = sources
        .iter()
        .map(|source| {
            let lifts = LiftTotals::from_records(source.records.as_ref());
            RelativeLeaderboardRow {
                username: display_name(source.username.as_deref(), source.email.as_deref()),
                bench: lifts.bench,
                squat: lifts.squat,
                deadlift: lifts.deadlift,
                bodyweight_ratio: bodyweight_ratio(&lifts, source.bodyweight.as_deref()),
            }
        })
        .collect();

    rows.sort_by(|a, b| descending(a.bodyweight_ratio, b.bodyweight_ratio));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str, lifts: (&str, &str, &str), bodyweight: Option<&str>) -> RankSource {
        RankSource {
            username: Some(name.to_string()),
            email: None,
            records: Some(PersonalRecords {
                bench: lifts.0.to_string(),
                squat: lifts.1.to_string(),
                deadlift: lifts.2.to_string(),
            }),
            bodyweight: bodyweight.map(str::to_string),
        }
    }

    #[test]
    fn total_ranking_orders_by_sum() {
        let users = vec![
            source("u2", ("300", "0", "0"), None),
            source("u1", ("100", "150", "200"), None),
        ];

        let rows = rank_by_total(&users, SortKey::Total);
        assert_eq!(rows[0].username, "u1");
        assert_eq!(rows[0].total, 450.0);
        assert_eq!(rows[1].username, "u2");
        assert_eq!(rows[1].total, 300.0);
    }

    #[test]
    fn total_ranking_can_sort_by_single_lift() {
        let users = vec![
            source("u1", ("100", "150", "200"), None),
            source("u2", ("300", "0", "0"), None),
        ];

        let rows = rank_by_total(&users, SortKey::Bench);
        assert_eq!(rows[0].username, "u2");
    }

    #[test]
    fn ties_keep_enumeration_order() {
        let users = vec![
            source("first", ("100", "100", "100"), None),
            source("second", ("150", "150", "0"), None),
            source("third", ("300", "0", "0"), None),
        ];

        let names: Vec<_> = rank_by_total(&users, SortKey::Total)
            .into_iter()
            .map(|r| r.username)
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn missing_records_rank_as_zero() {
        let users = vec![RankSource {
            username: Some("newbie".to_string()),
            ..Default::default()
        }];

        let rows = rank_by_total(&users, SortKey::Total);
        assert_eq!(rows[0].bench, 0.0);
        assert_eq!(rows[0].squat, 0.0);
        assert_eq!(rows[0].deadlift, 0.0);
        assert_eq!(rows[0].total, 0.0);
    }

    #[test]
    fn garbage_record_values_rank_as_zero() {
        let users = vec![source("u", ("abc", "100", ""), None)];
        let rows = rank_by_total(&users, SortKey::Total);
        assert_eq!(rows[0].total, 100.0);
    }

    #[test]
    fn relative_ranking_normalises_by_bodyweight() {
        let users = vec![
            source("heavy", ("100", "100", "100"), Some("200")),
            source("light", ("100", "100", "100"), Some("100")),
        ];

        let rows = rank_by_bodyweight(&users);
        assert_eq!(rows[0].username, "light");
        assert_eq!(rows[0].bodyweight_ratio, 1.0);
        assert_eq!(rows[1].username, "heavy");
        assert_eq!(rows[1].bodyweight_ratio, 0.5);
    }

    #[test]
    fn ratio_rounds_to_two_decimals() {
        let lifts = LiftTotals {
            bench: 100.0,
            squat: 140.0,
            deadlift: 180.0,
        };
        // 140 / 75 = 1.8666...
        assert_eq!(bodyweight_ratio(&lifts, Some("75")), 1.87);
    }

    #[test]
    fn unusable_bodyweight_gives_zero_ratio() {
        let lifts = LiftTotals {
            bench: 100.0,
            squat: 100.0,
            deadlift: 100.0,
        };
        assert_eq!(bodyweight_ratio(&lifts, None), 0.0);
        assert_eq!(bodyweight_ratio(&lifts, Some("")), 0.0);
        assert_eq!(bodyweight_ratio(&lifts, Some("eighty")), 0.0);
        assert_eq!(bodyweight_ratio(&lifts, Some("0")), 0.0);
        assert_eq!(bodyweight_ratio(&lifts, Some("-70")), 0.0);
    }

    #[test]
    fn display_name_fallbacks() {
        assert_eq!(display_name(Some("alice"), Some("a@x.io")), "alice");
        assert_eq!(display_name(None, Some("bob@example.com")), "bob");
        assert_eq!(display_name(Some(""), Some("carol@example.com")), "carol");
        assert_eq!(display_name(None, Some("no-at-sign")), "no-at-sign");
        assert_eq!(display_name(None, None), "Anonymous");
        assert_eq!(display_name(None, Some("")), "Anonymous");
    }

    #[test]
    fn sort_key_parsing() {
        assert_eq!("total".parse::<SortKey>(), Ok(SortKey::Total));
        assert_eq!("Deadlift".parse::<SortKey>(), Ok(SortKey::Deadlift));
        assert!("wilks".parse::<SortKey>().is_err());
    }
}
