use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::middleware::auth::Session;
use crate::views::page;

pub mod auth;
pub mod dashboard;
pub mod preferences;
pub mod students;

/// Fallback for unmatched routes.
pub async fn not_found(session: Session) -> Response {
    let content = html! {
        div class="text-center py-16" {
            h1 class="text-5xl font-bold mb-4" { "404" }
            p class="text-gray-500 dark:text-gray-400 mb-6" { "Page not found" }
            a href="/" class="text-indigo-600 hover:underline" { "Go back home" }
        }
    };
    let markup = page("Page not found", &session, content);
    (StatusCode::NOT_FOUND, session.into_jar(), markup).into_response()
}
