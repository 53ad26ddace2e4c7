use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use registrar_observability::{logging_middleware, metrics_middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::middleware::auth::require_session;
use crate::modules::auth::router::init_auth_router;
use crate::modules::dashboard::router::{init_dashboard_pages, init_dashboard_router};
use crate::modules::not_found;
use crate::modules::preferences::init_preferences_router;
use crate::modules::students::router::{init_student_pages, init_students_router};
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let pages = init_dashboard_pages()
        .merge(init_student_pages())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(init_auth_router())
        .merge(init_preferences_router())
        .merge(pages)
        .nest(
            "/api",
            Router::new()
                .nest("/students", init_students_router())
                .nest("/dashboard", init_dashboard_router()),
        )
        .fallback(not_found)
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .server_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
