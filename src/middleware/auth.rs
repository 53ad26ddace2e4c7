use std::convert::Infallible;

use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::{
    TypedHeader,
    extract::cookie::CookieJar,
    headers::{Authorization, authorization::Bearer},
};
use registrar_auth::AuthenticatedUser;
use registrar_core::AppError;
use tracing::debug;

use crate::modules::auth::navigation::login_redirect;
use crate::state::AppState;
use crate::utils::cookies::{dark_mode, session_token};
use crate::utils::flash::{Flash, clear_flash, read_flash};

async fn authenticate(jar: &CookieJar, state: &AppState) -> Option<AuthenticatedUser> {
    let token = session_token(jar, &state.session_config)?;
    match state.identity.authenticate(token).await {
        Ok(user) => Some(user),
        Err(e) => {
            debug!(error = %e.error, "Ignoring invalid session cookie");
            None
        }
    }
}

/// What a page needs to know about the visitor: who they are, the theme
/// and any pending notification.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: Option<AuthenticatedUser>,
    /// Path and query of the current request.
    pub path: String,
    pub dark_mode: bool,
    pub flash: Option<Flash>,
    pub jar: CookieJar,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Cookie jar to send back with a rendered page; the flash has been shown.
    pub fn into_jar(self) -> CookieJar {
        clear_flash(self.jar)
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let user = match parts.extensions.get::<AuthenticatedUser>() {
            Some(user) => Some(user.clone()),
            None => authenticate(&jar, state).await,
        };

        let path = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        Ok(Session {
            user,
            path,
            dark_mode: dark_mode(&jar),
            flash: read_flash(&jar),
            jar,
        })
    }
}

/// Redirects visitors without a valid session to
/// `/login?redirect=<path and query>`.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());
    match authenticate(&jar, &state).await {
        Some(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        None => {
            let target = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or("/");
            Redirect::to(&login_redirect(target)).into_response()
        }
    }
}

/// Extractor for the JSON API: a bearer token, or the session cookie.
#[derive(Debug, Clone)]
pub struct ApiUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for ApiUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string());

        let token = match bearer {
            Some(token) => token,
            None => {
                let jar = CookieJar::from_headers(&parts.headers);
                session_token(&jar, &state.session_config)
                    .map(str::to_string)
                    .ok_or_else(|| AppError::unauthorized(anyhow!("Missing authorization header")))?
            }
        };

        state.identity.authenticate(&token).await.map(ApiUser)
    }
}
