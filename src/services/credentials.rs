//! Password hashing and bearer-token issuance.
//!
//! Argon2 work is CPU-bound, so both hashing and verification run on the
//! blocking pool instead of the async workers.

use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tokio::task;
use tracing::{debug, error, warn};

use crate::config::SecurityConfig;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: u64,
}

pub struct CredentialService {
    params: Params,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_ttl: Duration,
}

impl CredentialService {
    pub fn new(config: &SecurityConfig) -> Result<Self> {
        let params = Params::new(
            config.argon2_memory_cost_kib,
            config.argon2_time_cost,
            config.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;

        let secret = config.jwt_secret.as_bytes();

        Ok(Self {
            params,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(jsonwebtoken::Algorithm::HS256),
            default_ttl: Duration::minutes(i64::from(config.token_ttl_minutes)),
        })
    }

    /// Salted Argon2id hash in PHC string format.
    pub async fn hash(&self, password: &str) -> Result<String> {
        let params = self.params.clone();
        let password = password.to_string();

        task::spawn_blocking(move || hash_password(&password, params))
            .await
            .context("Password hashing task panicked")?
    }

    /// Never fails: a mismatch, an unreadable stored hash or a crashed worker
    /// all read as "not verified".
    pub async fn verify(&self, password: &str, password_hash: &str) -> bool {
        let password = password.to_string();
        let password_hash = password_hash.to_string();

        match task::spawn_blocking(move || verify_password(&password, &password_hash)).await {
            Ok(valid) => valid,
            Err(e) => {
                error!("Password verification task panicked: {e}");
                false
            }
        }
    }

    /// Signs a token for `subject`, valid for `ttl` or the configured default.
    pub fn issue_token(&self, subject: &str, ttl: Option<Duration>) -> Result<String> {
        let expires_at = Utc::now() + ttl.unwrap_or(self.default_ttl);
        let claims = Claims {
            sub: subject.to_string(),
            exp: u64::try_from(expires_at.timestamp()).unwrap_or(0),
        };

        encode(&Header::default(), &claims, &self.encoding_key).context("Failed to sign token")
    }

    /// Subject of a valid token. Bad signatures, expiry and malformed input
    /// are deliberately indistinguishable to the caller.
    #[must_use]
    pub fn validate_token(&self, token: &str) -> Option<String> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) if !data.claims.sub.is_empty() => Some(data.claims.sub),
            Ok(_) => {
                debug!("Rejected token with empty subject");
                None
            }
            Err(e) => {
                debug!("Rejected token: {e}");
                None
            }
        }
    }
}

fn hash_password(password: &str, params: Params) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

fn verify_password(password: &str, password_hash: &str) -> bool {
    let parsed = match PasswordHash::new(password_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Password verification failed (unreadable hash format): {e}");
            return false;
        }
    };

    // Params are read from the PHC string, so hashes made under older
    // settings still verify.
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => true,
        Err(e) => {
            debug!("Password verification failed: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> CredentialService {
        let config = SecurityConfig {
            argon2_memory_cost_kib: 64,
            argon2_time_cost: 1,
            jwt_secret: "test-secret".to_string(),
            ..SecurityConfig::default()
        };
        CredentialService::new(&config).unwrap()
    }

    #[tokio::test]
    async fn hash_then_verify() {
        let creds = service();
        let hash = creds.hash("hunter2").await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(creds.verify("hunter2", &hash).await);
        assert!(!creds.verify("hunter3", &hash).await);
    }

    #[tokio::test]
    async fn hashes_are_salted() {
        let creds = service();
        let a = creds.hash("same").await.unwrap();
        let b = creds.hash("same").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn legacy_hash_format_fails_closed() {
        let creds = service();
        assert!(!creds.verify("password", "$2b$12$notanargonhash").await);
        assert!(!creds.verify("password", "").await);
    }

    #[test]
    fn token_round_trip() {
        let creds = service();
        let token = creds.issue_token("alice", None).unwrap();
        assert_eq!(creds.validate_token(&token).as_deref(), Some("alice"));
    }

    #[test]
    fn expired_token_is_invalid() {
        let creds = service();
        let token = creds
            .issue_token("alice", Some(Duration::hours(-2)))
            .unwrap();
        assert_eq!(creds.validate_token(&token), None);
    }

    #[test]
    fn token_from_other_secret_is_invalid() {
        let other = CredentialService::new(&SecurityConfig {
            argon2_memory_cost_kib: 64,
            argon2_time_cost: 1,
            jwt_secret: "someone-else".to_string(),
            ..SecurityConfig::default()
        })
        .unwrap();

        let token = other.issue_token("alice", None).unwrap();
        assert_eq!(service().validate_token(&token), None);
    }

    #[test]
    fn garbage_token_is_invalid() {
        let creds = service();
        assert_eq!(creds.validate_token("not.a.token"), None);
        assert_eq!(creds.validate_token(""), None);
    }
}
