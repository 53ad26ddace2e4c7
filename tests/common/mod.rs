#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use registrar::router::init_router;
use registrar::state::AppState;
use registrar::testing::{memory_state, seed_students, session_token, student_record};
use registrar_client::MemoryRecordClient;
use serde_json::Value;

pub struct TestApp {
    pub client: Arc<MemoryRecordClient>,
    pub state: AppState,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Self {
        let (client, state) = memory_state();
        let token = session_token(&state);
        Self {
            client,
            state,
            token,
        }
    }

    /// App seeded with John Davis, Amy Brown and Carl Young.
    pub fn seeded() -> Self {
        let app = Self::new();
        seed_students(
            &app.client,
            [
                student_record("John", "Davis", "Computer Science", "active"),
                student_record("Amy", "Brown", "Biology", "inactive"),
                student_record("Carl", "Young", "Davis Studies", "inactive"),
            ],
        );
        app
    }

    pub fn router(&self) -> Router {
        init_router(self.state.clone())
    }

    pub fn session_cookie(&self) -> String {
        format!("{}={}", self.state.session_config.cookie_name, self.token)
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, cookie: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn api_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location<B>(response: &Response<B>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// All `Set-Cookie` header values of a response.
pub fn set_cookies<B>(response: &Response<B>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_string))
        .collect()
}
