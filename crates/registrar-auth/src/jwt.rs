//! Session token creation and verification.
//!
//! Tokens are HS256 JWTs signed with the secret shared with the identity
//! provider (`SESSION_SECRET`). The provider issues them on sign-in; this
//! application verifies them on every request and can mint its own for
//! tooling and tests.
//!
//! # Example
//!
//! ```ignore
//! use registrar_auth::{create_session_token, verify_session_token};
//! use registrar_config::SessionConfig;
//!
//! let config = SessionConfig::from_env();
//! let token = create_session_token("user_1", "registrar@example.com", None, &config)?;
//! let claims = verify_session_token(&token, &config)?;
//! ```

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use registrar_config::SessionConfig;
use registrar_core::AppError;

use crate::claims::IdentityClaims;

/// Creates a session token valid for `SESSION_TTL_SECS`.
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
pub fn create_session_token(
    sub: &str,
    email: &str,
    name: Option<&str>,
    config: &SessionConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + config.ttl_secs as usize;

    let claims = IdentityClaims {
        sub: sub.to_string(),
        email: email.to_string(),
        name: name.map(str::to_string),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create token: {}", e)))
}

/// Verifies a session token and returns its claims.
///
/// # Errors
///
/// Returns an unauthorized error if the signature is invalid, the token has
/// expired or it is malformed.
pub fn verify_session_token(token: &str, config: &SessionConfig) -> Result<IdentityClaims, AppError> {
    decode::<IdentityClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(anyhow!("Invalid or expired token")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_session_config() -> SessionConfig {
        SessionConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            ttl_secs: 3600,
            ..SessionConfig::default()
        }
    }

    #[test]
    fn test_create_session_token_success() {
        let config = get_test_session_config();
        let token = create_session_token("user_1", "test@example.com", None, &config).unwrap();
        assert!(!token.is_empty());
    }

    #[test]
    fn test_verify_session_token_success() {
        let config = get_test_session_config();
        let token =
            create_session_token("user_1", "test@example.com", Some("Test User"), &config).unwrap();

        let claims = verify_session_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "user_1");
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.name.as_deref(), Some("Test User"));
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_verify_session_token_invalid() {
        let config = get_test_session_config();
        let err = verify_session_token("invalid-token", &config).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_verify_session_token_wrong_secret() {
        let config = get_test_session_config();
        let token = create_session_token("user_1", "test@example.com", None, &config).unwrap();

        let wrong_config = SessionConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            ..get_test_session_config()
        };
        assert!(verify_session_token(&token, &wrong_config).is_err());
    }

    #[test]
    fn test_verify_session_token_expired() {
        let config = get_test_session_config();
        let now = Utc::now().timestamp() as usize;
        let claims = IdentityClaims {
            sub: "user_1".to_string(),
            email: "test@example.com".to_string(),
            name: None,
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_session_token(&token, &config).is_err());
    }
}
