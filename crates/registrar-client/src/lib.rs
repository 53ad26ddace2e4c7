//! # Registrar Client
//!
//! Adapter for the external record store that owns student data.
//!
//! The application talks to the store only through the [`RecordClient`]
//! trait, injected at startup:
//!
//! - [`http::HttpRecordClient`]: the hosted record store over HTTP
//! - [`memory::MemoryRecordClient`]: an in-process store with the same query semantics
//!
//! # Example
//!
//! ```ignore
//! use registrar_client::{build_client, query::DeletePayload};
//! use registrar_config::StoreConfig;
//!
//! let client = build_client(&StoreConfig::from_env())?;
//! let response = client
//!     .delete_record("student", &DeletePayload { record_ids: vec![4] })
//!     .await?;
//! ```

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use registrar_config::{StoreBackend, StoreConfig};

pub mod error;
pub mod http;
pub mod memory;
pub mod query;

pub use error::ClientError;
pub use http::HttpRecordClient;
pub use memory::MemoryRecordClient;
pub use query::{
    DeletePayload, DeleteResponse, FetchParams, FetchResponse, MutationResponse, RecordId,
    RecordResponse, RecordsPayload,
};

#[async_trait]
pub trait RecordClient: Send + Sync + Debug {
    async fn fetch_records(
        &self,
        table: &str,
        params: &FetchParams,
    ) -> Result<FetchResponse, ClientError>;

    async fn get_record_by_id(
        &self,
        table: &str,
        id: RecordId,
    ) -> Result<RecordResponse, ClientError>;

    async fn create_record(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<MutationResponse, ClientError>;

    async fn update_record(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<MutationResponse, ClientError>;

    async fn delete_record(
        &self,
        table: &str,
        payload: &DeletePayload,
    ) -> Result<DeleteResponse, ClientError>;
}

/// Builds the client selected by `STORE_BACKEND`.
///
/// The remote backend fails without any network contact when either
/// credential is missing.
pub fn build_client(config: &StoreConfig) -> Result<Arc<dyn RecordClient>, ClientError> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryRecordClient::new())),
        StoreBackend::Remote => {
            let credentials = config.credentials()?;
            let client = HttpRecordClient::new(&config.base_url, credentials, config.timeout)?;
            Ok(Arc::new(client))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_config::ConfigError;

    #[test]
    fn test_build_client_missing_credentials() {
        let config = StoreConfig::default();
        let err = build_client(&config).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Config(ConfigError::Missing("STORE_PROJECT_ID"))
        ));
    }

    #[test]
    fn test_build_client_memory_needs_no_credentials() {
        let config = StoreConfig {
            backend: StoreBackend::Memory,
            ..Default::default()
        };
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn test_build_client_remote() {
        let config = StoreConfig {
            project_id: Some("proj".into()),
            public_key: Some("key".into()),
            ..Default::default()
        };
        assert!(build_client(&config).is_ok());
    }
}
