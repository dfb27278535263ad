//! Typed routine and workout-log payloads.
//!
//! The client owns most of these shapes, so every struct keeps the fields it
//! does not understand in a flattened map and writes them back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A lift value as the client sent it: the logger submits text fields, older
/// clients and scripts send plain numbers. Anything else is kept as is and
/// never credited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
    Other(Value),
}

impl MetricValue {
    /// Numeric reading of the value; `None` when it is blank, not a number
    /// or not finite.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    #[serde(
        rename = "metricValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub metric_value: Option<MetricValue>,

    /// Raw completion flag; only a JSON `true` counts as completed.
    #[serde(
        rename = "isCompleted",
        default,
        skip_serializing_if = "Value::is_null"
    )]
    pub completed: Value,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SetRecord {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed == Value::Bool(true)
    }

    /// Weight credited by this set: completed sets with a readable value.
    #[must_use]
    pub fn credited_value(&self) -> Option<f64> {
        if !self.is_completed() {
            return None;
        }
        self.metric_value.as_ref().and_then(MetricValue::as_f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseLog {
    #[serde(rename = "exerciseName", alias = "name", default)]
    pub exercise_name: String,

    #[serde(default)]
    pub sets: Vec<SetRecord>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExerciseLog {
    /// Best credited set, or 0 when nothing was completed.
    #[must_use]
    pub fn best_completed(&self) -> f64 {
        self.sets
            .iter()
            .filter_map(SetRecord::credited_value)
            .fold(0.0, f64::max)
    }
}

/// Unit a routine exercise is logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MetricType {
    Kg,
    Lbs,
    Plates,
    Secs,
}

const fn default_target_sets() -> Option<u32> {
    Some(3)
}

/// A planned exercise inside a routine day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineExercise {
    pub id: String,

    pub name: String,

    /// Superset/partner relation as the client names it.
    pub relation: String,

    /// Missing means 3; an explicit `null` means unspecified.
    #[serde(
        default = "default_target_sets",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_sets: Option<u32>,

    pub default_metric: MetricType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_metric: Option<MetricType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_muscle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_muscles: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One day of a routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    pub exercises: Vec<RoutineExercise>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A finished workout as submitted by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLog {
    pub workout_title: String,

    pub date: String,

    #[serde(default)]
    pub timestamp: Option<f64>,

    #[serde(default)]
    pub exercises: Vec<ExerciseLog>,

    #[serde(default)]
    pub is_load_out: bool,
}

/// A stored workout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i32,
    pub workout_title: String,
    pub date: String,
    pub timestamp: Option<f64>,
    pub exercises: Vec<ExerciseLog>,
    pub is_load_out: bool,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn workout_log_uses_client_field_names() {
        let log: WorkoutLog = serde_json::from_value(json!({
            "workoutTitle": "Push A",
            "date": "3/14/2025",
            "timestamp": 1_741_910_400_000_u64,
            "isLoadOut": true,
            "exercises": [{"exerciseName": "Bench Press", "sets": []}]
        }))
        .unwrap();

        assert_eq!(log.workout_title, "Push A");
        assert_eq!(log.timestamp, Some(1_741_910_400_000.0));
        assert!(log.is_load_out);
        assert_eq!(log.exercises.len(), 1);
    }

    #[test]
    fn metric_value_accepts_numbers_and_text() {
        let sets: Vec<SetRecord> = serde_json::from_value(json!([
            {"metricValue": 100, "isCompleted": true},
            {"metricValue": " 102.5 ", "isCompleted": true},
            {"metricValue": "heavy", "isCompleted": true},
            {"isCompleted": true},
        ]))
        .unwrap();

        assert_eq!(sets[0].credited_value(), Some(100.0));
        assert_eq!(sets[1].credited_value(), Some(102.5));
        assert_eq!(sets[2].credited_value(), None);
        assert_eq!(sets[3].credited_value(), None);
    }

    #[test]
    fn odd_set_values_parse_and_credit_nothing() {
        let sets: Vec<SetRecord> = serde_json::from_value(json!([
            {"metricValue": true, "isCompleted": true},
            {"metricValue": {"kg": 100}, "isCompleted": true},
            {"metricValue": [100], "isCompleted": true},
            {"metricValue": null, "isCompleted": true},
            {"metricValue": "100", "isCompleted": "yes"},
            {"metricValue": "100", "isCompleted": 1},
            {"metricValue": "90", "isCompleted": true},
        ]))
        .unwrap();

        let credited: Vec<_> = sets.iter().map(SetRecord::credited_value).collect();
        assert_eq!(
            credited,
            [None, None, None, None, None, None, Some(90.0)]
        );
        assert_eq!(sets[4].completed, json!("yes"));
    }

    #[test]
    fn incomplete_sets_are_not_credited() {
        let set: SetRecord =
            serde_json::from_value(json!({"metricValue": "200", "isCompleted": false})).unwrap();
        assert_eq!(set.credited_value(), None);
    }

    #[test]
    fn best_completed_ignores_garbage() {
        let log: ExerciseLog = serde_json::from_value(json!({
            "exerciseName": "Squat",
            "sets": [
                {"metricValue": "140", "isCompleted": true},
                {"metricValue": "NaN", "isCompleted": true},
                {"metricValue": "180", "isCompleted": false},
                {"metricValue": "-20", "isCompleted": true},
            ]
        }))
        .unwrap();

        assert_eq!(log.best_completed(), 140.0);
    }

    #[test]
    fn empty_sets_score_zero() {
        let log: ExerciseLog = serde_json::from_value(json!({"exerciseName": "Squat"})).unwrap();
        assert_eq!(log.best_completed(), 0.0);
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = json!({
            "exerciseId": "abc123",
            "exerciseName": "Bench Press",
            "timestamp": 1_700_000_000_000_u64,
            "sets": [{
                "id": "s1",
                "reps": "5",
                "metricValue": "100",
                "metricType": "KG",
                "isDropSet": false,
                "isCompleted": true
            }]
        });

        let log: ExerciseLog = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(log.extra["exerciseId"], "abc123");
        assert_eq!(serde_json::to_value(&log).unwrap(), raw);
    }

    #[test]
    fn routine_exercise_is_typed() {
        let session: WorkoutSession = serde_json::from_value(json!({
            "id": "day-1",
            "title": "Push",
            "exercises": [{
                "id": "e1",
                "name": "Bench Press",
                "relation": "superset",
                "defaultMetric": "LBS",
                "partnerName": "Dips",
                "partnerMetric": "SECS",
                "notes": "pause reps"
            }]
        }))
        .unwrap();

        let exercise = &session.exercises[0];
        assert_eq!(exercise.default_metric, MetricType::Lbs);
        assert_eq!(exercise.partner_metric, Some(MetricType::Secs));
        assert_eq!(exercise.target_sets, Some(3));
        assert_eq!(exercise.extra["notes"], "pause reps");
    }

    #[test]
    fn routine_exercise_rejects_unknown_metric() {
        let result = serde_json::from_value::<RoutineExercise>(json!({
            "id": "e1",
            "name": "Plank",
            "relation": "none",
            "defaultMetric": "MINUTES"
        }));
        assert!(result.is_err());

        let result = serde_json::from_value::<RoutineExercise>(json!({
            "id": "e1",
            "name": "Plank",
            "relation": "none"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn name_alias_is_accepted() {
        let log: ExerciseLog =
            serde_json::from_value(json!({"name": "Deadlift", "sets": []})).unwrap();
        assert_eq!(log.exercise_name, "Deadlift");
    }
}
