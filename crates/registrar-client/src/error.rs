use registrar_config::ConfigError;
use thiserror::Error;

use crate::query::RecordId;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Record store is not configured: {0}")]
    Config(#[from] ConfigError),
    #[error("Record store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Record store responded with {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Record {id} not found in {table}")]
    NotFound { table: String, id: RecordId },
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("Failed to decode record store response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
            || matches!(self, ClientError::Status { status: 404, .. })
    }
}
