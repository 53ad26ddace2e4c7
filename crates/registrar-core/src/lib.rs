//! # Registrar Core
//!
//! Core types, errors, and utilities for Registrar.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`envelope`]: The `{success, data, total?, error?}` result envelope
//! - [`errors`]: Application error types with HTTP response conversion
//! - [`pagination`]: Pagination parameters and page-window arithmetic
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use registrar_core::envelope::{Envelope, ErrorCode};
//! use registrar_core::pagination::PageState;
//!
//! // A failed lookup never escapes as an `Err`
//! let result: Envelope<Option<u32>> =
//!     Envelope::failure(None, ErrorCode::NotFound, "Student not found");
//! assert!(!result.success);
//!
//! // Page window for the list footer
//! let page = PageState::new(23, 3, 10);
//! assert_eq!(page.showing_from(), 21);
//! assert_eq!(page.showing_to(), 23);
//! ```

pub mod envelope;
pub mod errors;
pub mod pagination;
pub mod serde;

// Re-export commonly used types at crate root
pub use envelope::{Envelope, ErrorCode};
pub use errors::AppError;
pub use pagination::{PageState, PaginationParams};
