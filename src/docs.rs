use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use registrar_core::ErrorCode;
use registrar_models::{
    DashboardStats, DashboardSummary, SortDirection, Student, StudentField, StudentFilters,
    StudentInput, StudentStatus, StudentYear,
};

use crate::modules::students::model::{ErrorResponse, StudentListResponse, StudentResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::dashboard::controller::get_dashboard,
    ),
    components(
        schemas(
            Student,
            StudentInput,
            StudentField,
            StudentStatus,
            StudentYear,
            StudentFilters,
            SortDirection,
            StudentListResponse,
            StudentResponse,
            DashboardStats,
            DashboardSummary,
            ErrorCode,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Students", description = "Student records"),
        (name = "Dashboard", description = "Aggregate student statistics")
    ),
    info(
        title = "Registrar API",
        version = "0.1.0",
        description = "Student records management over a hosted record store. Every student operation answers with a `{success, data, total?, error?}` envelope.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_student_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/students"));
        assert!(doc.paths.paths.contains_key("/api/students/{id}"));
        assert!(doc.paths.paths.contains_key("/api/dashboard"));
    }
}
