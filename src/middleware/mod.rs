//! Middleware and extractors for request processing.
//!
//! # Modules
//!
//! - [`auth`]: Session extraction, the page gate and the API extractor
//!
//! # Authentication Flow
//!
//! 1. The identity provider returns to `/callback` with a signed token
//! 2. The token is stored in the HTTP-only session cookie
//! 3. [`auth::require_session`] guards every page except the auth pages and
//!    sends anonymous visitors to `/login?redirect=<path and query>`
//! 4. JSON endpoints take [`auth::ApiUser`], which also accepts
//!    `Authorization: Bearer <token>`
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::{ApiUser, Session};
//!
//! async fn page(session: Session) -> impl IntoResponse {
//!     let dark = session.dark_mode;
//!     // ...
//! }
//!
//! async fn api(ApiUser(user): ApiUser) -> impl IntoResponse {
//!     // Only executes with a valid token
//! }
//! ```

pub mod auth;
