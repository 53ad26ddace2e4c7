//! Client-side preferences stored in cookies.

use axum::{
    Form, Router,
    response::{IntoResponse, Redirect, Response},
    routing::post,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::modules::auth::navigation::local_destination;
use crate::state::AppState;
use crate::utils::cookies::dark_mode_cookie;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DarkModeForm {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Stores the dark-mode flag and returns to the page it was toggled on.
pub async fn set_dark_mode(jar: CookieJar, Form(form): Form<DarkModeForm>) -> Response {
    let enabled = form.enabled.unwrap_or(false);
    let target = local_destination(form.return_to.as_deref().unwrap_or("/"));
    (jar.add(dark_mode_cookie(enabled)), Redirect::to(target)).into_response()
}

pub fn init_preferences_router() -> Router<AppState> {
    Router::new().route("/preferences/dark-mode", post(set_dark_mode))
}
