//! Response shapes of the student JSON API, for the OpenAPI document.
//!
//! Handlers return [`registrar_core::Envelope`] directly; these structs only
//! describe its concrete instantiations.

use registrar_core::ErrorCode;
use registrar_models::Student;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct StudentListResponse {
    pub success: bool,
    pub data: Vec<Student>,
    /// Total matching records across all pages.
    pub total: Option<u64>,
    pub error: Option<String>,
    pub code: Option<ErrorCode>,
}

#[derive(ToSchema)]
pub struct StudentResponse {
    pub success: bool,
    pub data: Option<Student>,
    pub error: Option<String>,
    pub code: Option<ErrorCode>,
}

/// Body of rejected requests. `fields` carries per-field validation messages.
#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub fields: Option<std::collections::BTreeMap<String, String>>,
}
