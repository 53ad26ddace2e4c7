use std::sync::Arc;

use registrar_auth::{IdentityProvider, JwtIdentityProvider};
use registrar_client::RecordClient;
use registrar_config::{ServerConfig, SessionConfig, StoreConfig};
use tracing::warn;

use crate::modules::students::service::StudentService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub students: StudentService,
    pub identity: Arc<dyn IdentityProvider>,
    pub session_config: SessionConfig,
    pub server_config: ServerConfig,
}

impl AppState {
    /// State around an already constructed record client.
    pub fn with_client(client: Arc<dyn RecordClient>, session_config: SessionConfig) -> Self {
        Self::assemble(StudentService::new(client), session_config)
    }

    fn assemble(students: StudentService, session_config: SessionConfig) -> Self {
        Self {
            students,
            identity: Arc::new(JwtIdentityProvider::new(session_config.clone())),
            session_config,
            server_config: ServerConfig::default(),
        }
    }
}

pub fn init_app_state() -> AppState {
    let session_config = SessionConfig::from_env();
    if session_config.uses_default_secret() {
        warn!("SESSION_SECRET is not set; using the development default");
    }

    let students = StudentService::from_config(&StoreConfig::from_env());
    AppState {
        server_config: ServerConfig::from_env(),
        ..AppState::assemble(students, session_config)
    }
}
