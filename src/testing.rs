//! Helpers for driving the application against the in-memory record store.

use std::sync::Arc;

use registrar_auth::create_session_token;
use registrar_client::MemoryRecordClient;
use registrar_config::SessionConfig;
use serde_json::{Value, json};

use crate::modules::students::query::STUDENT_TABLE;
use crate::state::AppState;

pub const TEST_SECRET: &str = "test-session-secret";

pub fn session_config() -> SessionConfig {
    SessionConfig {
        secret: TEST_SECRET.to_string(),
        ..SessionConfig::default()
    }
}

/// State backed by a fresh in-memory store, which is returned for seeding
/// and inspection.
pub fn memory_state() -> (Arc<MemoryRecordClient>, AppState) {
    let client = Arc::new(MemoryRecordClient::new());
    let state = AppState::with_client(client.clone(), session_config());
    (client, state)
}

/// A valid session token for the test user.
pub fn session_token(state: &AppState) -> String {
    create_session_token(
        "user-1",
        "registrar@example.com",
        Some("Test Registrar"),
        &state.session_config,
    )
    .expect("test token")
}

/// Stored representation of a student, without an identifier.
pub fn student_record(first: &str, last: &str, program: &str, status: &str) -> Value {
    json!({
        "firstName": first,
        "lastName": last,
        "email": format!("{}.{}@email.com", first.to_lowercase(), last.to_lowercase()),
        "phone": "555-0101",
        "dob": "2003-05-15",
        "program": program,
        "enrollmentDate": "2021-09-01",
        "status": status,
        "year": "Junior"
    })
}

pub fn seed_students(client: &MemoryRecordClient, records: impl IntoIterator<Item = Value>) {
    client.seed(STUDENT_TABLE, records);
}
