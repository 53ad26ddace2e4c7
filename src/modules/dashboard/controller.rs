use axum::extract::State;
use registrar_core::Envelope;
use registrar_models::DashboardSummary;
use tracing::instrument;

use crate::middleware::auth::ApiUser;
use crate::modules::dashboard::service::DashboardService;
use crate::modules::students::model::ErrorResponse;
use crate::state::AppState;

/// Student totals and the most recent enrolments
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummary),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 502, description = "Record store error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
#[instrument(skip(state, user), fields(user = %user.0.id))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    user: ApiUser,
) -> Envelope<DashboardSummary> {
    DashboardService::new(state.students.clone()).summary().await
}
