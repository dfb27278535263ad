//! Personal-record derivation from logged workouts.

use serde::{Deserialize, Serialize};

use super::Lift;
use super::workout::ExerciseLog;

/// Best lifts for one user, kept as the numeric strings the client edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalRecords {
    pub bench: String,
    pub squat: String,
    pub deadlift: String,
}

impl Default for PersonalRecords {
    fn default() -> Self {
        Self {
            bench: "0".to_string(),
            squat: "0".to_string(),
            deadlift: "0".to_string(),
        }
    }
}

impl PersonalRecords {
    #[must_use]
    pub fn raw(&self, lift: Lift) -> &str {
        match lift {
            Lift::Bench => &self.bench,
            Lift::Squat => &self.squat,
            Lift::Deadlift => &self.deadlift,
        }
    }

    /// Numeric value of a lift; unreadable entries count as 0.
    #[must_use]
    pub fn value(&self, lift: Lift) -> f64 {
        parse_lenient(self.raw(lift))
    }

    fn set(&mut self, lift: Lift, value: f64) {
        let formatted = format_weight(value);
        match lift {
            Lift::Bench => self.bench = formatted,
            Lift::Squat => self.squat = formatted,
            Lift::Deadlift => self.deadlift = formatted,
        }
    }
}

/// Result of a derivation pass that beat at least one stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordUpdate {
    pub records: PersonalRecords,
    pub improved: Vec<Lift>,
}

/// Parses a stored or submitted weight. Blank, non-numeric and non-finite
/// input reads as 0.
#[must_use]
pub fn parse_lenient(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// `100.0` renders as "100", `102.5` as "102.5".
fn format_weight(value: f64) -> String {
    format!("{value}")
}

/// Merges a workout's best completed sets into the current records.
///
/// Returns `None` when no category strictly improved, which also covers the
/// case of a user without records logging nothing but zeros: no all-zero row
/// gets created.
#[must_use]
pub fn derive_records(
    current: Option<&PersonalRecords>,
    exercises: &[ExerciseLog],
) -> Option<RecordUpdate> {
    let mut records = current.cloned().unwrap_or_default();
    let mut improved = Vec::new();

    for exercise in exercises {
        let lifts = Lift::classify(&exercise.exercise_name);
        if lifts.is_empty() {
            continue;
        }

        let candidate = exercise.best_completed();
        for lift in lifts {
            if candidate > records.value(lift) {
                records.set(lift, candidate);
                if !improved.contains(&lift) {
                    improved.push(lift);
                }
            }
        }
    }

    if improved.is_empty() {
        None
    } else {
        Some(RecordUpdate { records, improved })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn log(name: &str, sets: &[(&str, bool)]) -> ExerciseLog {
        let sets: Vec<_> = sets
            .iter()
            .map(|(value, done)| json!({"metricValue": value, "isCompleted": done}))
            .collect();
        serde_json::from_value(json!({"exerciseName": name, "sets": sets})).unwrap()
    }

    fn records(bench: &str, squat: &str, deadlift: &str) -> PersonalRecords {
        PersonalRecords {
            bench: bench.to_string(),
            squat: squat.to_string(),
            deadlift: deadlift.to_string(),
        }
    }

    #[test]
    fn first_workout_creates_records() {
        let update = derive_records(None, &[log("Bench Press", &[("80", true), ("90", true)])])
            .expect("bench should improve");

        assert_eq!(update.records, records("90", "0", "0"));
        assert_eq!(update.improved, vec![Lift::Bench]);
    }

    #[test]
    fn lower_lift_does_not_replace_record() {
        let current = records("100", "150", "200");
        let result = derive_records(Some(&current), &[log("Squat", &[("140", true)])]);
        assert!(result.is_none());
    }

    #[test]
    fn equal_lift_is_not_an_improvement() {
        let current = records("100", "150", "200");
        let result = derive_records(Some(&current), &[log("Deadlift", &[("200", true)])]);
        assert!(result.is_none());
    }

    #[test]
    fn comparison_is_numeric_not_lexical() {
        // "95" > "100" as strings, but not as weights.
        let current = records("100", "0", "0");
        assert!(derive_records(Some(&current), &[log("Bench", &[("95", true)])]).is_none());

        let current = records("95", "0", "0");
        let update = derive_records(Some(&current), &[log("Bench", &[("100", true)])]).unwrap();
        assert_eq!(update.records.bench, "100");
    }

    #[test]
    fn only_completed_sets_count() {
        let update = derive_records(
            None,
            &[log("Back Squat", &[("120", true), ("200", false)])],
        )
        .unwrap();
        assert_eq!(update.records.squat, "120");
    }

    #[test]
    fn unparsable_sets_are_ignored() {
        let update = derive_records(
            None,
            &[log("Deadlift", &[("abc", true), ("", true), ("180.5", true)])],
        )
        .unwrap();
        assert_eq!(update.records.deadlift, "180.5");
    }

    #[test]
    fn no_records_and_zero_candidates_creates_nothing() {
        assert!(derive_records(None, &[log("Bench Press", &[])]).is_none());
        assert!(derive_records(None, &[log("Squat", &[("0", true)])]).is_none());
        assert!(derive_records(None, &[log("Squat", &[("junk", true)])]).is_none());
    }

    #[test]
    fn empty_sets_never_beat_a_positive_record() {
        let current = records("60", "80", "100");
        assert!(derive_records(Some(&current), &[log("Bench", &[])]).is_none());
    }

    #[test]
    fn multi_category_exercise_updates_each_lift() {
        let current = records("100", "100", "100");
        let update = derive_records(
            Some(&current),
            &[log("Deadlift Bench Press Squat Combo", &[("120", true)])],
        )
        .unwrap();

        assert_eq!(update.records, records("120", "120", "120"));
        assert_eq!(
            update.improved,
            vec![Lift::Bench, Lift::Squat, Lift::Deadlift]
        );
    }

    #[test]
    fn multi_category_match_is_evaluated_per_lift() {
        let current = records("0", "150", "100");
        let update = derive_records(
            Some(&current),
            &[log("Deadlift Bench Squat Combo", &[("120", true)])],
        )
        .unwrap();

        // Squat record stays; deadlift moves. Bench is untouched because the
        // name has no "bench press".
        assert_eq!(update.records, records("0", "150", "120"));
        assert_eq!(update.improved, vec![Lift::Deadlift]);
    }

    #[test]
    fn corrupt_stored_value_reads_as_zero() {
        let current = records("n/a", "100", "100");
        let update = derive_records(Some(&current), &[log("Bench", &[("40", true)])]).unwrap();
        assert_eq!(update.records.bench, "40");
        assert_eq!(update.records.squat, "100");
    }

    #[test]
    fn later_exercise_in_same_workout_can_raise_again() {
        let update = derive_records(
            None,
            &[
                log("Squat", &[("100", true)]),
                log("Pause Squat", &[("110", true)]),
                log("Front Squat", &[("90", true)]),
            ],
        )
        .unwrap();
        assert_eq!(update.records.squat, "110");
        assert_eq!(update.improved, vec![Lift::Squat]);
    }

    #[test]
    fn parse_lenient_cases() {
        assert_eq!(parse_lenient("100"), 100.0);
        assert_eq!(parse_lenient(" 72.5 "), 72.5);
        assert_eq!(parse_lenient(""), 0.0);
        assert_eq!(parse_lenient("inf"), 0.0);
        assert_eq!(parse_lenient("heavy"), 0.0);
    }
}
