use super::ApiError;

const MAX_USERNAME_LEN: usize = 50;
const MAX_EMAIL_LEN: usize = 254;

pub fn validate_username(username: &str) -> Result<&str, ApiError> {
    if username.trim().is_empty() {
        return Err(ApiError::validation("Username cannot be empty"));
    }

    if username.trim() != username {
        return Err(ApiError::validation(
            "Username cannot start or end with whitespace",
        ));
    }

    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(ApiError::validation(format!(
            "Username must be {MAX_USERNAME_LEN} characters or less"
        )));
    }

    Ok(username)
}

pub fn validate_password(password: &str) -> Result<&str, ApiError> {
    if password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }
    Ok(password)
}

/// Blank emails are treated as absent.
pub fn validate_email(email: Option<&str>) -> Result<Option<&str>, ApiError> {
    let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) else {
        return Ok(None);
    };

    if email.len() > MAX_EMAIL_LEN {
        return Err(ApiError::validation(format!(
            "Email must be {MAX_EMAIL_LEN} characters or less"
        )));
    }

    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty() && !domain.contains('@'));

    if !valid {
        return Err(ApiError::validation(format!("Invalid email address: {email}")));
    }

    Ok(Some(email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("Alice_99").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_username(" alice").is_err());
        assert!(validate_username("alice@example.com").is_ok());
        assert!(validate_username(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("x").is_ok());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email(None).unwrap(), None);
        assert_eq!(validate_email(Some("  ")).unwrap(), None);
        assert_eq!(
            validate_email(Some(" a@b.com ")).unwrap(),
            Some("a@b.com")
        );
        assert!(validate_email(Some("no-at-sign")).is_err());
        assert!(validate_email(Some("@b.com")).is_err());
        assert!(validate_email(Some("a@")).is_err());
        assert!(validate_email(Some("a@b@c")).is_err());
    }
}
