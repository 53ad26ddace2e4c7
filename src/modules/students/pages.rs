use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use registrar_core::PageState;
use registrar_models::{StudentId, StudentListQuery};
use tracing::instrument;

use crate::middleware::auth::Session;
use crate::modules::students::form::{StudentFormFields, StudentFormState, SubmitOutcome};
use crate::modules::students::list::{ListState, LoadOutcome, StudentListController};
use crate::modules::students::templates;
use crate::state::AppState;
use crate::utils::flash::{Flash, set_flash};
use crate::views::page;

fn redirect_with(session: Session, flash: Flash, to: &str) -> Response {
    (set_flash(session.into_jar(), &flash), Redirect::to(to)).into_response()
}

fn render_form(mut session: Session, form: &StudentFormState, status: StatusCode) -> Response {
    let title = if form.is_editing() {
        "Edit Student"
    } else {
        "Add Student"
    };
    if !form.errors.is_empty() && session.flash.is_none() {
        session.flash = Some(Flash::error("Please fix the errors in the form"));
    }
    let markup = page(title, &session, templates::form(form));
    (status, session.into_jar(), markup).into_response()
}

#[instrument(skip(state, session))]
pub async fn list_students(
    State(state): State<AppState>,
    mut session: Session,
    Query(query): Query<StudentListQuery>,
) -> Response {
    let paging = query.pagination();
    let initial = ListState {
        filters: query.filters(),
        pagination: PageState::new(0, paging.page(), paging.limit()),
        ..Default::default()
    };
    let controller = StudentListController::with_state(state.students.clone(), initial);

    let outcome = controller.reload().await;
    let list = controller.snapshot();

    let pagination = list.pagination;
    if outcome == LoadOutcome::Applied
        && pagination.total > 0
        && !pagination.contains_page(pagination.current_page)
    {
        let first = StudentListQuery::from_state(&list.filters, 1, pagination.limit);
        return Redirect::to(&format!("/students?{}", first.to_query_string())).into_response();
    }
    if let Some(error) = &list.error {
        session.flash = Some(Flash::error(error.clone()));
    }

    let markup = page("Students", &session, templates::list(&list));
    (session.into_jar(), markup).into_response()
}

pub async fn new_student(session: Session) -> Response {
    render_form(session, &StudentFormState::for_create(), StatusCode::OK)
}

#[instrument(skip(state, session))]
pub async fn show_student(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<StudentId>,
) -> Response {
    let response = state.students.get_student_by_id(id).await;
    match response.data {
        Some(student) if response.success => {
            let today = chrono::Local::now().date_naive();
            let markup = page(
                &student.full_name(),
                &session,
                templates::detail(&student, today),
            );
            (session.into_jar(), markup).into_response()
        }
        _ => redirect_with(
            session,
            Flash::error("Failed to load student details"),
            "/students",
        ),
    }
}

#[instrument(skip(state, session))]
pub async fn edit_student(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<StudentId>,
) -> Response {
    let response = state.students.get_student_by_id(id).await;
    match response.data {
        Some(student) if response.success => {
            render_form(session, &StudentFormState::for_edit(&student), StatusCode::OK)
        }
        _ => redirect_with(
            session,
            Flash::error("Failed to load student details"),
            "/students",
        ),
    }
}

/// Validates the form and creates or updates depending on whether it
/// carries an identifier.
async fn save(state: AppState, mut session: Session, mut form: StudentFormState) -> Response {
    let students = state.students.clone();
    let outcome = form
        .submit(|values, editing| async move {
            if editing {
                students.update_student(values).await
            } else {
                students.create_student(values).await
            }
        })
        .await;

    match outcome {
        SubmitOutcome::Invalid => render_form(session, &form, StatusCode::UNPROCESSABLE_ENTITY),
        SubmitOutcome::Submitted(response) if response.success => {
            let (message, target) = match response.data.as_ref().map(|s| s.id) {
                Some(id) if form.is_editing() => {
                    ("Student updated successfully!", format!("/students/{id}"))
                }
                _ => ("Student added successfully!", "/students".to_string()),
            };
            redirect_with(session, Flash::success(message), &target)
        }
        SubmitOutcome::Submitted(response) => {
            let fallback = if form.is_editing() {
                "Failed to update student"
            } else {
                "Failed to add student"
            };
            let message = response.error.unwrap_or_else(|| fallback.to_string());
            session.flash = Some(Flash::error(message));
            render_form(session, &form, StatusCode::BAD_GATEWAY)
        }
    }
}

#[instrument(skip_all)]
pub async fn create_student(
    State(state): State<AppState>,
    session: Session,
    Form(fields): Form<StudentFormFields>,
) -> Response {
    let mut form = StudentFormState::from_fields(&fields);
    form.values.id = None;
    save(state, session, form).await
}

#[instrument(skip(state, session, fields))]
pub async fn update_student(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<StudentId>,
    Form(fields): Form<StudentFormFields>,
) -> Response {
    let mut form = StudentFormState::from_fields(&fields);
    form.values.id = Some(id);
    save(state, session, form).await
}

#[instrument(skip(state, session))]
pub async fn delete_student(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<StudentId>,
) -> Response {
    let response = state.students.delete_student(id).await;
    if response.success {
        redirect_with(
            session,
            Flash::success("Student deleted successfully!"),
            "/students",
        )
    } else {
        let message = response
            .error
            .unwrap_or_else(|| "Failed to delete student".to_string());
        redirect_with(session, Flash::error(message), "/students")
    }
}
