//! # Registrar Auth
//!
//! Identity types and session token utilities for Registrar.
//!
//! This crate provides:
//!
//! - [`claims`]: Token claims and the authenticated user
//! - [`jwt`]: Session token creation and verification
//! - [`provider`]: The [`IdentityProvider`] seam and its JWT implementation
//!
//! # Example
//!
//! ```ignore
//! use registrar_auth::{IdentityProvider, JwtIdentityProvider};
//! use registrar_config::SessionConfig;
//!
//! let provider = JwtIdentityProvider::new(SessionConfig::from_env());
//! let user = provider.authenticate(&token).await?;
//! println!("Signed in as {}", user.display_name());
//! ```

pub mod claims;
pub mod jwt;
pub mod provider;

// Re-export commonly used types at crate root
pub use claims::{AuthenticatedUser, IdentityClaims};
pub use jwt::{create_session_token, verify_session_token};
pub use provider::{IdentityProvider, JwtIdentityProvider};
