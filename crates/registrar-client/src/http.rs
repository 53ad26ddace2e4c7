//! HTTP transport for the hosted record store.
//!
//! Endpoints, relative to the configured base URL:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | fetch     | `POST   /tables/{table}/records/query` |
//! | get       | `GET    /tables/{table}/records/{id}` |
//! | create    | `POST   /tables/{table}/records` |
//! | update    | `PUT    /tables/{table}/records` |
//! | delete    | `DELETE /tables/{table}/records` |
//!
//! Every request carries the `x-project-id` and `x-public-key` headers.

use std::time::Duration;

use async_trait::async_trait;
use registrar_config::StoreCredentials;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::ClientError;
use crate::query::{
    DeletePayload, DeleteResponse, FetchParams, FetchResponse, MutationResponse, RecordId,
    RecordResponse, RecordsPayload,
};
use crate::RecordClient;

pub const PROJECT_ID_HEADER: &str = "x-project-id";
pub const PUBLIC_KEY_HEADER: &str = "x-public-key";

#[derive(Debug, Clone)]
pub struct HttpRecordClient {
    http: reqwest::Client,
    base_url: String,
    credentials: StoreCredentials,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl HttpRecordClient {
    pub fn new(
        base_url: &str,
        credentials: StoreCredentials,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("registrar/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn records_url(&self, table: &str) -> String {
        format!("{}/tables/{}/records", self.base_url, table)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(PROJECT_ID_HEADER, &self.credentials.project_id)
            .header(PUBLIC_KEY_HEADER, &self.credentials.public_key)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        let bytes = response.bytes().await?;
        debug!(status = %status.as_u16(), bytes = bytes.len(), "Record store responded");
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unexpected status")
                .to_string()
        })
}

#[async_trait]
impl RecordClient for HttpRecordClient {
    #[instrument(skip(self, params))]
    async fn fetch_records(
        &self,
        table: &str,
        params: &FetchParams,
    ) -> Result<FetchResponse, ClientError> {
        let url = format!("{}/query", self.records_url(table));
        self.send(self.request(Method::POST, url).json(params)).await
    }

    #[instrument(skip(self))]
    async fn get_record_by_id(
        &self,
        table: &str,
        id: RecordId,
    ) -> Result<RecordResponse, ClientError> {
        let url = format!("{}/{}", self.records_url(table), id);
        match self.send(self.request(Method::GET, url)).await {
            Err(ClientError::Status { status: 404, .. }) => Err(ClientError::NotFound {
                table: table.to_string(),
                id,
            }),
            other => other,
        }
    }

    #[instrument(skip(self, payload))]
    async fn create_record(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<MutationResponse, ClientError> {
        let url = self.records_url(table);
        self.send(self.request(Method::POST, url).json(payload)).await
    }

    #[instrument(skip(self, payload))]
    async fn update_record(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<MutationResponse, ClientError> {
        let url = self.records_url(table);
        self.send(self.request(Method::PUT, url).json(payload)).await
    }

    #[instrument(skip(self, payload))]
    async fn delete_record(
        &self,
        table: &str,
        payload: &DeletePayload,
    ) -> Result<DeleteResponse, ClientError> {
        let url = self.records_url(table);
        self.send(self.request(Method::DELETE, url).json(payload)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::Path,
        http::{HeaderMap, StatusCode as AxumStatus},
        routing::{get, post},
    };
    use serde_json::{Value, json};

    async fn spawn_store() -> String {
        async fn query(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
            Json(json!({
                "data": [{"Id": 1, "projectId": headers["x-project-id"].to_str().unwrap()}],
                "total": 1,
                "echo": body
            }))
        }

        async fn get_one(Path((_table, id)): Path<(String, i64)>) -> Result<Json<Value>, AxumStatus> {
            if id == 1 {
                Ok(Json(json!({"data": {"Id": 1}})))
            } else {
                Err(AxumStatus::NOT_FOUND)
            }
        }

        async fn create(Json(body): Json<Value>) -> (AxumStatus, Json<Value>) {
            if body["records"][0]["firstName"] == "bad" {
                return (
                    AxumStatus::UNPROCESSABLE_ENTITY,
                    Json(json!({"message": "firstName rejected"})),
                );
            }
            (
                AxumStatus::OK,
                Json(json!({"success": true, "results": [{"success": true, "data": {"Id": 2}}]})),
            )
        }

        let app = Router::new()
            .route("/tables/{table}/records/query", post(query))
            .route("/tables/{table}/records/{id}", get(get_one))
            .route("/tables/{table}/records", post(create));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/")
    }

    fn client(base_url: &str) -> HttpRecordClient {
        HttpRecordClient::new(
            base_url,
            StoreCredentials {
                project_id: "proj_1".into(),
                public_key: "pk_1".into(),
            },
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn params() -> FetchParams {
        serde_json::from_value(json!({
            "fields": [{"field": {"name": "Id"}}],
            "orderBy": [{"field": "lastName", "direction": "asc"}],
            "pagingInfo": {"limit": 10, "offset": 0}
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_sends_credentials() {
        let base = spawn_store().await;
        let response = client(&base).fetch_records("student", &params()).await.unwrap();
        assert_eq!(response.total, Some(1));
        let data = response.data.unwrap();
        assert_eq!(data[0]["projectId"], "proj_1");
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let base = spawn_store().await;
        let err = client(&base)
            .get_record_by_id("student", 99)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotFound { id: 99, .. }));
    }

    #[tokio::test]
    async fn test_get_found() {
        let base = spawn_store().await;
        let response = client(&base).get_record_by_id("student", 1).await.unwrap();
        assert_eq!(response.data, Some(json!({"Id": 1})));
    }

    #[tokio::test]
    async fn test_create_error_status_uses_body_message() {
        let base = spawn_store().await;
        let payload = RecordsPayload {
            records: vec![json!({"firstName": "bad"})],
        };
        let err = client(&base)
            .create_record("student", &payload)
            .await
            .unwrap_err();
        match err {
            ClientError::Status { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "firstName rejected");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_error() {
        let err = client("http://127.0.0.1:1")
            .fetch_records("student", &params())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn test_error_message_fallback() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "<html>"),
            "Bad Gateway"
        );
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"error":"nope"}"#),
            "nope"
        );
    }
}
