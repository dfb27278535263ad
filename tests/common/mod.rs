#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use ubgym::api::AppState;
use ubgym::config::Config;

pub struct TestApp {
    pub state: Arc<AppState>,
    pub router: Router,
}

pub async fn spawn_app() -> TestApp {
    let db_path =
        std::env::temp_dir().join(format!("ubgym-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.security.jwt_secret = "integration-test-secret".to_string();
    // Cheap hashing keeps the suite fast.
    config.security.argon2_memory_cost_kib = 64;
    config.security.argon2_time_cost = 1;

    let state = ubgym::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");
    let router = ubgym::api::router(state.clone()).await;

    TestApp { state, router }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        token: Option<&str>,
        body: &Value,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn login(&self, identity: &str, password: &str) -> (StatusCode, Value) {
        let form = format!(
            "username={}&password={}",
            form_encode(identity),
            form_encode(password)
        );
        self.send(
            Request::builder()
                .method("POST")
                .uri("/api/auth/token")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form))
                .unwrap(),
        )
        .await
    }

    /// Registers a user and returns its token.
    pub async fn register(&self, username: &str, email: Option<&str>) -> String {
        let (status, body) = self
            .post_json(
                "/api/auth/register",
                None,
                &serde_json::json!({
                    "username": username,
                    "password": "password123",
                    "email": email,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register {username}: {body}");
        body["access_token"]
            .as_str()
            .expect("token in register response")
            .to_string()
    }

    pub async fn set_records(&self, token: &str, bench: &str, squat: &str, deadlift: &str) {
        let (status, body) = self
            .post_json(
                "/api/prs",
                Some(token),
                &serde_json::json!({"bench": bench, "squat": squat, "deadlift": deadlift}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "set records: {body}");
    }

    pub async fn set_bodyweight(&self, token: &str, weight: &str) {
        let (status, body) = self
            .post_json("/api/profile", Some(token), &serde_json::json!({"weight": weight}))
            .await;
        assert_eq!(status, StatusCode::OK, "set profile: {body}");
    }
}

/// Enough of `application/x-www-form-urlencoded` for test identities.
fn form_encode(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => c.to_string(),
            ' ' => "+".to_string(),
            other => {
                let mut buf = [0u8; 4];
                other
                    .encode_utf8(&mut buf)
                    .bytes()
                    .map(|b| format!("%{b:02X}"))
                    .collect()
            }
        })
        .collect()
}

/// A workout body with one exercise and the given `(value, completed)` sets.
pub fn workout(exercise: &str, sets: &[(&str, bool)]) -> Value {
    let sets: Vec<Value> = sets
        .iter()
        .enumerate()
        .map(|(i, (value, done))| {
            serde_json::json!({
                "id": format!("s{i}"),
                "reps": "5",
                "metricValue": value,
                "metricType": "KG",
                "isCompleted": done,
            })
        })
        .collect();

    serde_json::json!({
        "workoutTitle": "Test Day",
        "date": "3/14/2025",
        "timestamp": 1_741_910_400_000_u64,
        "isLoadOut": false,
        "exercises": [{"exerciseId": "e1", "exerciseName": exercise, "sets": sets}],
    })
}
