//! Session and identity provider configuration.
//!
//! # Configuration
//!
//! - `SESSION_SECRET`: HMAC secret shared with the identity provider for token signatures
//! - `SESSION_COOKIE`: name of the session cookie (default: `session`)
//! - `SESSION_TTL_SECS`: session cookie lifetime in seconds (default: 86400)
//! - `IDENTITY_URL`: hosted sign-in page; when unset the local login page explains how to sign in
//! - `APP_URL`: public base URL of this application, used for callback URLs (default: `http://localhost:3000`)
//! - `SECURE_COOKIES`: mark cookies `Secure` (default: false)

use crate::{env_lookup, non_empty};

pub const DEFAULT_SESSION_SECRET: &str = "your-secret-key-change-in-production";

#[derive(Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub cookie_name: String,
    pub ttl_secs: i64,
    pub identity_url: Option<String>,
    pub app_url: String,
    pub secure_cookies: bool,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"***")
            .field("cookie_name", &self.cookie_name)
            .field("ttl_secs", &self.ttl_secs)
            .field("identity_url", &self.identity_url)
            .field("app_url", &self.app_url)
            .field("secure_cookies", &self.secure_cookies)
            .finish()
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SESSION_SECRET.to_string(),
            cookie_name: "session".to_string(),
            ttl_secs: 86_400,
            identity_url: None,
            app_url: "http://localhost:3000".to_string(),
            secure_cookies: false,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            secret: non_empty(&lookup, "SESSION_SECRET").unwrap_or(defaults.secret),
            cookie_name: non_empty(&lookup, "SESSION_COOKIE").unwrap_or(defaults.cookie_name),
            ttl_secs: non_empty(&lookup, "SESSION_TTL_SECS")
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|ttl| *ttl > 0)
                .unwrap_or(defaults.ttl_secs),
            identity_url: non_empty(&lookup, "IDENTITY_URL"),
            app_url: non_empty(&lookup, "APP_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.app_url),
            secure_cookies: non_empty(&lookup, "SECURE_COOKIES")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_SESSION_SECRET
    }

    /// Absolute callback URL the identity provider returns to.
    pub fn callback_url(&self) -> String {
        format!("{}/callback", self.app_url)
    }
}
