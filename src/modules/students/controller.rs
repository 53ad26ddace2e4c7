use axum::extract::{Path, Query, State};
use registrar_core::Envelope;
use registrar_models::{Student, StudentId, StudentInput, StudentListQuery};
use tracing::instrument;

use crate::middleware::auth::ApiUser;
use crate::modules::students::model::{ErrorResponse, StudentListResponse, StudentResponse};
use crate::modules::students::query::FetchStudentsOptions;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List students with search, filters, sorting and pagination
#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentListQuery),
    responses(
        (status = 200, description = "One page of students", body = StudentListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 502, description = "Record store error", body = StudentListResponse),
        (status = 503, description = "Record store client unavailable", body = StudentListResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, user), fields(user = %user.0.id))]
pub async fn get_students(
    State(state): State<AppState>,
    user: ApiUser,
    Query(query): Query<StudentListQuery>,
) -> Envelope<Vec<Student>> {
    let paging = query.pagination();
    let options =
        FetchStudentsOptions::from_filters(&query.filters(), paging.limit(), paging.offset());
    state.students.fetch_students(&options).await
}

/// Get a student by record id
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(
        ("id" = i64, Path, description = "Student record ID")
    ),
    responses(
        (status = 200, description = "Student details", body = StudentResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = StudentResponse),
        (status = 502, description = "Record store error", body = StudentResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, user), fields(user = %user.0.id))]
pub async fn get_student(
    State(state): State<AppState>,
    user: ApiUser,
    Path(id): Path<StudentId>,
) -> Envelope<Option<Student>> {
    state.students.get_student_by_id(id).await
}

/// Create a student
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = StudentInput,
    responses(
        (status = 200, description = "Student created", body = StudentResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 502, description = "Record store error", body = StudentResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, user, input), fields(user = %user.0.id))]
pub async fn create_student(
    State(state): State<AppState>,
    user: ApiUser,
    ValidatedJson(input): ValidatedJson<StudentInput>,
) -> Envelope<Option<Student>> {
    state.students.create_student(input).await
}

/// Replace a student's fields
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(
        ("id" = i64, Path, description = "Student record ID")
    ),
    request_body = StudentInput,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = StudentResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 502, description = "Record store error", body = StudentResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, user, input), fields(user = %user.0.id))]
pub async fn update_student(
    State(state): State<AppState>,
    user: ApiUser,
    Path(id): Path<StudentId>,
    ValidatedJson(input): ValidatedJson<StudentInput>,
) -> Envelope<Option<Student>> {
    state.students.update_student(input.with_id(id)).await
}

/// Delete a student
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(
        ("id" = i64, Path, description = "Student record ID")
    ),
    responses(
        (status = 200, description = "Student deleted", body = StudentResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = StudentResponse),
        (status = 502, description = "Record store error", body = StudentResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, user), fields(user = %user.0.id))]
pub async fn delete_student(
    State(state): State<AppState>,
    user: ApiUser,
    Path(id): Path<StudentId>,
) -> Envelope<Option<Student>> {
    state.students.delete_student(id).await
}
