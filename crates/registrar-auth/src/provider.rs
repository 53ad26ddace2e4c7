//! Identity provider integration.
//!
//! The application never handles credentials itself. A hosted identity
//! provider runs the sign-in UI and returns to `/callback` with a signed
//! token; the application only needs to know whether a token is valid and
//! how to end a session.

use std::fmt::Debug;

use async_trait::async_trait;
use registrar_config::SessionConfig;
use registrar_core::AppError;
use tracing::{info, instrument};

use crate::claims::AuthenticatedUser;
use crate::jwt::verify_session_token;

#[async_trait]
pub trait IdentityProvider: Send + Sync + Debug {
    /// Resolves a token handed back by the provider into a user.
    async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AppError>;

    /// Ends the provider-side session of `user`.
    async fn logout(&self, user: &AuthenticatedUser) -> Result<(), AppError>;

    /// Hosted sign-in page, returning to the callback with `from` set to
    /// `destination`. `None` when no hosted page is configured.
    fn sign_in_url(&self, destination: Option<&str>) -> Option<String>;
}

/// Provider whose tokens are HS256 JWTs signed with the shared session secret.
#[derive(Debug, Clone)]
pub struct JwtIdentityProvider {
    config: SessionConfig,
}

impl JwtIdentityProvider {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    #[instrument(skip(self, token))]
    async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let claims = verify_session_token(token, &self.config)?;
        Ok(claims.into())
    }

    #[instrument(skip(self), fields(user_id = %user.id))]
    async fn logout(&self, user: &AuthenticatedUser) -> Result<(), AppError> {
        // Tokens are stateless; dropping the cookie ends the session.
        info!(email = %user.email, "Session ended");
        Ok(())
    }

    fn sign_in_url(&self, destination: Option<&str>) -> Option<String> {
        let base = self.config.identity_url.as_deref()?;
        let mut return_to = self.config.callback_url();
        if let Some(destination) = destination {
            return_to.push_str("?from=");
            return_to.push_str(&urlencoding::encode(destination));
        }
        let separator = if base.contains('?') { '&' } else { '?' };
        Some(format!(
            "{base}{separator}return_to={}",
            urlencoding::encode(&return_to)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::create_session_token;

    fn config(identity_url: Option<&str>) -> SessionConfig {
        SessionConfig {
            secret: "provider-test-secret".to_string(),
            identity_url: identity_url.map(str::to_string),
            app_url: "http://localhost:3000".to_string(),
            ..SessionConfig::default()
        }
    }

    #[tokio::test]
    async fn test_authenticate_valid_token() {
        let config = config(None);
        let token = create_session_token("u1", "a@example.com", Some("Ann"), &config).unwrap();
        let provider = JwtIdentityProvider::new(config);

        let user = provider.authenticate(&token).await.unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.display_name(), "Ann");
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let provider = JwtIdentityProvider::new(config(None));
        assert!(provider.authenticate("garbage").await.is_err());
    }

    #[tokio::test]
    async fn test_logout_succeeds() {
        let provider = JwtIdentityProvider::new(config(None));
        let user = AuthenticatedUser {
            id: "u1".into(),
            email: "a@example.com".into(),
            name: None,
        };
        assert!(provider.logout(&user).await.is_ok());
    }

    #[test]
    fn test_sign_in_url_without_identity_url() {
        let provider = JwtIdentityProvider::new(config(None));
        assert_eq!(provider.sign_in_url(Some("/students")), None);
    }

    #[test]
    fn test_sign_in_url_carries_destination() {
        let provider = JwtIdentityProvider::new(config(Some("https://id.example.com/login")));
        let url = provider.sign_in_url(Some("/students?page=2")).unwrap();
        assert_eq!(
            url,
            "https://id.example.com/login?return_to=http%3A%2F%2Flocalhost%3A3000%2Fcallback%3Ffrom%3D%252Fstudents%253Fpage%253D2"
        );
    }

    #[test]
    fn test_sign_in_url_appends_to_existing_query() {
        let provider =
            JwtIdentityProvider::new(config(Some("https://id.example.com/login?app=registrar")));
        let url = provider.sign_in_url(None).unwrap();
        assert_eq!(
            url,
            "https://id.example.com/login?app=registrar&return_to=http%3A%2F%2Flocalhost%3A3000%2Fcallback"
        );
    }
}
