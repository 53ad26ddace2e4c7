use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::students::{controller, pages};
use crate::state::AppState;

/// JSON API, nested under `/api/students`.
pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(controller::create_student).get(controller::get_students),
        )
        .route(
            "/{id}",
            get(controller::get_student)
                .put(controller::update_student)
                .delete(controller::delete_student),
        )
}

/// HTML pages, mounted at `/students` behind the session gate.
pub fn init_student_pages() -> Router<AppState> {
    Router::new()
        .route(
            "/students",
            get(pages::list_students).post(pages::create_student),
        )
        .route("/students/new", get(pages::new_student))
        .route(
            "/students/{id}",
            get(pages::show_student).post(pages::update_student),
        )
        .route("/students/{id}/edit", get(pages::edit_student))
        .route("/students/{id}/delete", post(pages::delete_student))
}
