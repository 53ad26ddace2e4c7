use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::auth::pages::{callback, error_page, login_page, logout, signup_page};
use crate::state::AppState;

/// Pages reachable without a session.
pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page))
        .route("/signup", get(signup_page))
        .route("/callback", get(callback))
        .route("/error", get(error_page))
        .route("/logout", post(logout))
}
