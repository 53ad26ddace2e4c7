use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};
use registrar_observability::{track_logout, track_session_started};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::middleware::auth::Session;
use crate::modules::auth::navigation::{
    LOGIN_PATH, SIGNUP_PATH, local_destination, login_redirect, post_auth_destination,
    redirect_param,
};
use crate::state::AppState;
use crate::utils::cookies::{clear_session, session_cookie};
use crate::utils::flash::{Flash, set_flash};
use crate::views::bare_page;

fn auth_card(heading: &str, sign_in_url: Option<&str>, alternate: Markup) -> Markup {
    html! {
        div class="min-h-screen flex items-center justify-center px-4" {
            div class="w-full max-w-md bg-white dark:bg-gray-800 rounded-lg shadow p-8 text-center" {
                h1 class="text-2xl font-bold mb-2" { (heading) }
                p class="text-gray-500 dark:text-gray-400 mb-6" { "Student records management" }
                @match sign_in_url {
                    Some(url) => {
                        a href=(url) class="block w-full px-4 py-2 rounded bg-indigo-600 text-white" {
                            "Continue to sign in"
                        }
                    }
                    None => {
                        p role="alert" class="text-red-600" {
                            "Sign-in is not configured. Set IDENTITY_URL to enable it."
                        }
                    }
                }
                div class="mt-6 text-sm" { (alternate) }
            }
        }
    }
}

/// Signed-in visitors are sent on; everyone else gets a link to the
/// hosted sign-in page that returns here afterwards.
fn auth_page(state: &AppState, session: Session, heading: &str, alternate: Markup) -> Response {
    if session.is_authenticated() {
        let redirect = redirect_param(&session.path);
        let target = post_auth_destination(true, &session.path, redirect.as_deref());
        return Redirect::to(local_destination(&target)).into_response();
    }

    let sign_in_url = state.identity.sign_in_url(Some(session.path.as_str()));
    let markup = bare_page(
        heading,
        &session,
        auth_card(heading, sign_in_url.as_deref(), alternate),
    );
    (session.into_jar(), markup).into_response()
}

pub async fn login_page(State(state): State<AppState>, session: Session) -> Response {
    let alternate = html! {
        "Don't have an account? "
        a href=(SIGNUP_PATH) class="text-indigo-600 hover:underline" { "Sign up" }
    };
    auth_page(&state, session, "Sign in", alternate)
}

pub async fn signup_page(State(state): State<AppState>, session: Session) -> Response {
    let alternate = html! {
        "Already have an account? "
        a href=(LOGIN_PATH) class="text-indigo-600 hover:underline" { "Sign in" }
    };
    auth_page(&state, session, "Create an account", alternate)
}

#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    pub token: Option<String>,
    /// Path and query of the page that started the sign-in.
    pub from: Option<String>,
    pub error: Option<String>,
}

fn failed_sign_in(session: Session, from: &str, message: &str) -> Response {
    let target = match redirect_param(from) {
        Some(redirect) => login_redirect(local_destination(&redirect)),
        None => LOGIN_PATH.to_string(),
    };
    let flash = Flash::error(format!("Authentication failed: {message}"));
    (set_flash(session.into_jar(), &flash), Redirect::to(&target)).into_response()
}

/// Return point of the hosted sign-in flow.
#[instrument(skip_all)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let from = query.from.as_deref().unwrap_or("/");

    if let Some(error) = query.error.as_deref() {
        warn!(error, "Identity provider reported a failure");
        return failed_sign_in(session, from, error);
    }
    let Some(token) = query.token.filter(|t| !t.is_empty()) else {
        return failed_sign_in(session, from, "missing token");
    };

    match state.identity.authenticate(&token).await {
        Ok(user) => {
            info!(user_id = %user.id, "Signed in");
            track_session_started();
            let redirect = redirect_param(from);
            let target = post_auth_destination(true, from, redirect.as_deref());
            let jar = session
                .into_jar()
                .add(session_cookie(token, &state.session_config));
            (jar, Redirect::to(local_destination(&target))).into_response()
        }
        Err(e) => {
            warn!(error = %e.error, "Rejected sign-in token");
            failed_sign_in(session, from, &e.error.to_string())
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorQuery {
    pub message: Option<String>,
}

pub async fn error_page(session: Session, Query(query): Query<ErrorQuery>) -> Response {
    let message = query
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| "Something went wrong while signing in.".to_string());
    let content = html! {
        div class="min-h-screen flex items-center justify-center px-4" {
            div class="w-full max-w-md bg-white dark:bg-gray-800 rounded-lg shadow p-8 text-center" {
                h1 class="text-2xl font-bold mb-4" { "Authentication error" }
                p role="alert" class="text-red-600 mb-6" { (message) }
                a href=(LOGIN_PATH) class="text-indigo-600 hover:underline" { "Back to sign in" }
            }
        }
    };
    let markup = bare_page("Authentication error", &session, content);
    (session.into_jar(), markup).into_response()
}

#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, session: Session) -> Response {
    if let Some(user) = session.user.clone() {
        if let Err(e) = state.identity.logout(&user).await {
            warn!(error = %e.error, "Logout failed");
            let flash = Flash::error(format!("Logout failed: {}", e.error));
            return (set_flash(session.into_jar(), &flash), Redirect::to("/")).into_response();
        }
        track_logout();
    }

    let jar = clear_session(session.into_jar(), &state.session_config);
    let jar = set_flash(jar, &Flash::success("Logged out successfully"));
    (jar, Redirect::to(LOGIN_PATH)).into_response()
}
