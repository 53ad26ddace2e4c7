//! Uniform result envelope for record-store operations.
//!
//! Every operation of the student query service answers with an
//! [`Envelope`] instead of an `Err`: callers branch on `success` and read
//! `data`, `total` and `error` from one shape.
//!
//! ```json
//! { "success": true,  "data": [...], "total": 42 }
//! { "success": false, "data": [],    "total": 0, "error": "...", "code": "store_error" }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Machine-readable failure category carried next to the human message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The record store client could not be constructed.
    ClientUnavailable,
    /// The request was rejected locally before reaching the store.
    InvalidRequest,
    /// The requested record does not exist.
    NotFound,
    /// Transport failure, non-2xx status or an unsuccessful store response.
    StoreError,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ClientUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::StoreError => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ClientUnavailable => "client_unavailable",
            ErrorCode::InvalidRequest => "invalid_request",
            ErrorCode::NotFound => "not_found",
            ErrorCode::StoreError => "store_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            total: None,
            error: None,
            code: None,
        }
    }

    pub fn page(data: T, total: u64) -> Self {
        Self {
            total: Some(total),
            ..Self::ok(data)
        }
    }

    pub fn failure(data: T, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data,
            total: None,
            error: Some(message.into()),
            code: Some(code),
        }
    }

    #[must_use]
    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    /// Error message of a failed envelope, empty string when successful.
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or_default()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            success: self.success,
            data: f(self.data),
            total: self.total,
            error: self.error,
            code: self.code,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = match (self.success, self.code) {
            (true, _) => StatusCode::OK,
            (false, Some(code)) => code.status(),
            (false, None) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_omits_optional_fields() {
        let json = serde_json::to_value(Envelope::ok(5)).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": 5}));
    }

    #[test]
    fn test_page_carries_total() {
        let envelope = Envelope::page(vec![1, 2], 12);
        assert!(envelope.success);
        assert_eq!(envelope.total, Some(12));
    }

    #[test]
    fn test_failure_serializes_code() {
        let envelope: Envelope<Vec<u8>> =
            Envelope::failure(Vec::new(), ErrorCode::StoreError, "boom").with_total(0);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["total"], 0);
        assert_eq!(json["error"], "boom");
        assert_eq!(json["code"], "store_error");
    }

    #[test]
    fn test_error_message_default() {
        assert_eq!(Envelope::ok(()).error_message(), "");
    }

    #[test]
    fn test_map_keeps_metadata() {
        let mapped = Envelope::page(3, 9).map(|n| n * 2);
        assert_eq!(mapped.data, 6);
        assert_eq!(mapped.total, Some(9));
    }

    #[test]
    fn test_code_status_mapping() {
        assert_eq!(
            ErrorCode::ClientUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(ErrorCode::InvalidRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::StoreError.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_into_response_uses_code_status() {
        let response =
            Envelope::failure((), ErrorCode::NotFound, "Student not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = Envelope::ok(()).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
