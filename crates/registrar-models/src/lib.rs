//! # Registrar Models
//!
//! Domain models and DTOs for Registrar.
//!
//! # Modules
//!
//! - [`students`]: Student records, form input and validation
//! - [`filters`]: Filter, sort and list query state
//! - [`dashboard`]: Aggregate statistics shown on the dashboard
//!
//! # Example
//!
//! ```ignore
//! use registrar_models::{StudentField, StudentFilters, StudentInput};
//!
//! let filters = StudentFilters::default().sorted_by(StudentField::LastName);
//!
//! if let Err(errors) = StudentInput::default().field_errors() {
//!     println!("{}", errors[&StudentField::FirstName]);
//! }
//! ```

pub mod dashboard;
pub mod filters;
pub mod students;

// Re-export commonly used types at crate root for convenience
pub use dashboard::{DashboardStats, DashboardSummary};
pub use filters::{SortDirection, StudentFilters, StudentListQuery};
pub use students::{
    FieldErrors, Student, StudentField, StudentId, StudentInput, StudentStatus, StudentYear,
    to_field_errors,
};
