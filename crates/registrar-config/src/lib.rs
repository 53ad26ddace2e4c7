//! # Registrar Config
//!
//! Configuration types loaded from environment variables:
//!
//! - [`store`]: Record store backend, credentials and endpoint
//! - [`session`]: Session cookie and identity provider settings
//! - [`server`]: Listen address and CORS origins
//!
//! Every config offers `from_env()` plus a `from_lookup()` constructor that
//! takes a key lookup closure, so tests never touch the process environment.
//!
//! # Example
//!
//! ```ignore
//! use registrar_config::{ServerConfig, SessionConfig, StoreConfig};
//!
//! let server = ServerConfig::from_env();
//! let session = SessionConfig::from_env();
//! let store = StoreConfig::from_env();
//! let credentials = store.credentials()?;
//! ```

pub mod server;
pub mod session;
pub mod store;

use thiserror::Error;

// Re-export commonly used types at crate root
pub use server::ServerConfig;
pub use session::SessionConfig;
pub use store::{StoreBackend, StoreConfig, StoreCredentials};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Reads `key`, treating empty or whitespace-only values as unset.
pub(crate) fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
pub(crate) fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let owned: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| {
        owned
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}
