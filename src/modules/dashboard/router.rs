use axum::{Router, routing::get};

use crate::modules::dashboard::{controller, pages};
use crate::state::AppState;

pub fn init_dashboard_router() -> Router<AppState> {
    Router::new().route("/", get(controller::get_dashboard))
}

pub fn init_dashboard_pages() -> Router<AppState> {
    Router::new().route("/", get(pages::dashboard_page))
}
