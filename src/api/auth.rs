use axum::{
    Form, Json,
    extract::{Request, State, rejection::FormRejection, rejection::JsonRejection},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::validation::{validate_email, validate_password, validate_username};
use super::{ApiError, AppState, RegisterRequest, TokenForm};
use crate::services::{AuthError, Registration, TokenGrant};

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::unauthorized("Incorrect username or password"),
            AuthError::InvalidToken => Self::unauthorized("Could not validate credentials"),
            AuthError::UsernameTaken => Self::Conflict("Username already exists".to_string()),
            AuthError::EmailTaken => Self::Conflict("Email already registered".to_string()),
            AuthError::AlreadyRegistered => {
                Self::Conflict("Username or email already registered".to_string())
            }
            AuthError::Validation(msg) => Self::validation(msg),
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::Internal(msg) => Self::internal(msg),
        }
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Resolves `Authorization: Bearer <token>` to a user and stores it in the
/// request extensions for handlers to extract.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

    let user = state.auth_service().authenticate(token).await?;

    tracing::Span::current().record("user_id", user.id.value());
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
///
/// Both auth routes answer with the bare OAuth2 token body rather than the
/// `ApiResponse` envelope; errors are still enveloped.
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<TokenGrant>, ApiError> {
    let Json(payload) = payload?;

    let username = validate_username(&payload.username)?;
    let password = validate_password(&payload.password)?;
    let email = validate_email(payload.email.as_deref())?;

    let grant = state
        .auth_service()
        .register(Registration {
            username: username.to_string(),
            password: password.to_string(),
            email: email.map(str::to_string),
        })
        .await?;

    Ok(Json(grant))
}

/// POST /auth/token
/// Form login; the `username` field accepts a username or an email.
pub async fn token(
    State(state): State<Arc<AppState>>,
    form: Result<Form<TokenForm>, FormRejection>,
) -> Result<Json<TokenGrant>, ApiError> {
    let Form(form) = form?;

    if form.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    validate_password(&form.password)?;

    let grant = state
        .auth_service()
        .login(&form.username, &form.password)
        .await
        .inspect_err(|e| {
            if matches!(e, AuthError::InvalidCredentials) {
                tracing::info!(identity = %form.username, "Failed login attempt");
            }
        })?;

    Ok(Json(grant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_extraction() {
        assert_eq!(extract_bearer_token(&headers("Bearer abc")), Some("abc"));
        assert_eq!(extract_bearer_token(&headers("bearer abc")), Some("abc"));
        assert_eq!(extract_bearer_token(&headers("Basic abc")), None);
        assert_eq!(extract_bearer_token(&headers("Bearer ")), None);
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }
}
