//! Per-user settings and body/profile attributes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_THEME: &str = "dark";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub is_load_out: bool,

    /// Omitted or null keeps the stored theme.
    #[serde(default)]
    pub theme: Option<String>,
}

/// Profile attributes are free text owned by the client, except `age`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub height: Option<String>,

    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub weight: Option<String>,

    #[serde(default, deserialize_with = "opt_age")]
    pub age: Option<i32>,

    #[serde(default)]
    pub gender: Option<String>,

    #[serde(default)]
    pub fitness_goal: Option<String>,
}

fn blank_to_none(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(blank_to_none(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

fn opt_age<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => match blank_to_none(s) {
            Some(s) => s,
            None => return Ok(None),
        },
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "expected an age, got {other}"
            )));
        }
    };

    raw.parse::<i32>()
        .map(Some)
        .map_err(|_| serde::de::Error::custom(format!("invalid age: {raw}")))
}
