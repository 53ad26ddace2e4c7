//! # Registrar
//!
//! Student records management built with Rust, Axum and maud. Records live
//! in a hosted record store reached through [`registrar_client`]; sign-in is
//! delegated to a hosted identity provider.
//!
//! ## Overview
//!
//! - **Student pages**: list with search, status/year filters, sortable
//!   columns and pagination; create, edit, detail and delete screens
//! - **Dashboard**: totals and the most recent enrolments
//! - **JSON API**: the same operations under `/api`, documented with OpenAPI
//! - **CLI**: seeding and record maintenance from the terminal
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── bin/cli.rs        # registrar-cli entry point
//! ├── cli/              # CLI commands (seeding, listing)
//! ├── middleware/       # Session extractor, page gate, API extractor
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Sign-in pages, callback, logout, navigation rules
//! │   ├── dashboard/   # Aggregate statistics
//! │   ├── preferences/ # Dark mode cookie
//! │   └── students/    # Query service, list controller, form, pages, API
//! ├── utils/            # Cookies, flash messages, formatting
//! └── views/            # Page layout and shared maud components
//! ```
//!
//! Feature modules follow the same layout:
//!
//! - `service.rs`: Operations over the record store
//! - `controller.rs`: JSON handlers
//! - `pages.rs`: HTML handlers
//! - `router.rs`: Axum router configuration
//!
//! ## Quick Start
//!
//! ```bash
//! STORE_PROJECT_ID=my-project
//! STORE_PUBLIC_KEY=pk_live_xxx
//! STORE_URL=https://records.example.com
//! SESSION_SECRET=shared-with-the-identity-provider
//! IDENTITY_URL=https://id.example.com/sign-in
//! ```
//!
//! `STORE_BACKEND=memory` runs against an in-process store instead.
//!
//! API documentation is served at `/swagger-ui` and `/scalar`.

pub mod cli;
pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
pub mod views;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export workspace crates for convenience
pub use registrar_auth;
pub use registrar_client;
pub use registrar_config;
pub use registrar_core;
pub use registrar_models;
