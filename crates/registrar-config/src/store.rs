//! Record store configuration.
//!
//! # Configuration
//!
//! - `STORE_BACKEND`: `remote` (default) or `memory`
//! - `STORE_PROJECT_ID`: project identifier sent with every request (required for `remote`)
//! - `STORE_PUBLIC_KEY`: public key sent with every request (required for `remote`)
//! - `STORE_URL`: base URL of the record store API (default: `http://localhost:4000`)
//! - `STORE_TIMEOUT_SECS`: per-request timeout in seconds (default: 30)
//!
//! Missing credentials do not fail config loading; they surface from
//! [`StoreConfig::credentials`] when the client is built, so the application
//! can still start and report a uniform "client unavailable" failure.

use std::str::FromStr;
use std::time::Duration;

use crate::{ConfigError, env_lookup, non_empty};

pub const DEFAULT_STORE_URL: &str = "http://localhost:4000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Remote,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "remote" | "http" => Ok(StoreBackend::Remote),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::Invalid {
                key: "STORE_BACKEND",
                value: s.to_string(),
            }),
        }
    }
}

/// Project identifier and public key, both present and non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreCredentials {
    pub project_id: String,
    pub public_key: String,
}

impl std::fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreCredentials")
            .field("project_id", &self.project_id)
            .field("public_key", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub project_id: Option<String>,
    pub public_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Remote,
            project_id: None,
            public_key: None,
            base_url: DEFAULT_STORE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    /// Builds the config from an arbitrary key lookup.
    ///
    /// Unparseable `STORE_BACKEND` or `STORE_TIMEOUT_SECS` values fall back
    /// to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = non_empty(&lookup, "STORE_BACKEND")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let timeout_secs = non_empty(&lookup, "STORE_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let base_url = non_empty(&lookup, "STORE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_STORE_URL.to_string());

        Self {
            backend,
            project_id: non_empty(&lookup, "STORE_PROJECT_ID"),
            public_key: non_empty(&lookup, "STORE_PUBLIC_KEY"),
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Returns both credentials or the first missing variable.
    pub fn credentials(&self) -> Result<StoreCredentials, ConfigError> {
        let project_id = self
            .project_id
            .clone()
            .ok_or(ConfigError::Missing("STORE_PROJECT_ID"))?;
        let public_key = self
            .public_key
            .clone()
            .ok_or(ConfigError::Missing("STORE_PUBLIC_KEY"))?;

        Ok(StoreCredentials {
            project_id,
            public_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup_from;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::from_lookup(|_| None);
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.base_url, "http://localhost:4000");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_full_config() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "memory"),
            ("STORE_PROJECT_ID", "proj_123"),
            ("STORE_PUBLIC_KEY", "pk_abc"),
            ("STORE_URL", "https://records.example.com/api/"),
            ("STORE_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(config.backend, StoreBackend::Memory);
        assert_eq!(config.base_url, "https://records.example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(5));

        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.project_id, "proj_123");
        assert_eq!(credentials.public_key, "pk_abc");
    }

    #[test]
    fn test_missing_project_id() {
        let config = StoreConfig::from_lookup(lookup_from(&[("STORE_PUBLIC_KEY", "pk_abc")]));
        assert_eq!(
            config.credentials(),
            Err(ConfigError::Missing("STORE_PROJECT_ID"))
        );
    }

    #[test]
    fn test_empty_public_key_counts_as_missing() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("STORE_PROJECT_ID", "proj_123"),
            ("STORE_PUBLIC_KEY", "   "),
        ]));
        assert_eq!(
            config.credentials(),
            Err(ConfigError::Missing("STORE_PUBLIC_KEY"))
        );
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "postgres"),
            ("STORE_TIMEOUT_SECS", "0"),
        ]));
        assert_eq!(config.backend, StoreBackend::Remote);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("MEMORY".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_credentials_debug_hides_key() {
        let credentials = StoreCredentials {
            project_id: "p".into(),
            public_key: "secret".into(),
        };
        assert!(!format!("{credentials:?}").contains("secret"));
    }
}
