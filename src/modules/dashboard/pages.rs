use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use registrar_models::DashboardSummary;
use tracing::instrument;

use crate::middleware::auth::Session;
use crate::modules::dashboard::service::DashboardService;
use crate::state::AppState;
use crate::utils::flash::Flash;
use crate::utils::format::{or_placeholder, short_date};
use crate::views::components::{avatar, empty_state, stat_card, status_badge, title};
use crate::views::page;

pub fn dashboard(summary: &DashboardSummary, greeting: &str) -> Markup {
    let stats = summary.stats;
    html! {
        (title("Dashboard", Some(greeting)))
        div class="grid grid-cols-1 sm:grid-cols-3 gap-4 mb-8" {
            (stat_card("Total Students", stats.total_students))
            (stat_card("Active Students", stats.active_students))
            (stat_card("Inactive Students", stats.inactive_students))
        }
        div class="bg-white dark:bg-gray-800 rounded-lg shadow p-6" {
            div class="flex justify-between items-center mb-4" {
                h2 class="text-lg font-semibold" { "Recent Students" }
                a href="/students" class="text-sm text-indigo-600 hover:underline" { "View all students" }
            }
            @if summary.recent_students.is_empty() {
                (empty_state("No students yet"))
            } @else {
                ul class="divide-y divide-gray-200 dark:divide-gray-700" {
                    @for student in &summary.recent_students {
                        li class="py-3 flex items-center gap-3" {
                            (avatar(&student.initials()))
                            div class="flex-1" {
                                a href={ "/students/" (student.id) } class="font-medium hover:underline" {
                                    (student.full_name())
                                }
                                p class="text-xs text-gray-500" {
                                    (or_placeholder(&student.program)) " • Enrolled " (short_date(student.enrollment_date))
                                }
                            }
                            (status_badge(student.status))
                        }
                    }
                }
            }
        }
    }
}

#[instrument(skip_all)]
pub async fn dashboard_page(State(state): State<AppState>, mut session: Session) -> Response {
    let response = DashboardService::new(state.students.clone()).summary().await;
    if !response.success {
        session.flash = Some(Flash::error(response.error_message()));
    }
    let greeting = match &session.user {
        Some(user) => format!("Welcome back, {}", user.display_name()),
        None => "Welcome back".to_string(),
    };
    let markup = page("Dashboard", &session, dashboard(&response.data, &greeting));
    (session.into_jar(), markup).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_models::DashboardStats;

    #[test]
    fn test_dashboard_renders_stats() {
        let summary = DashboardSummary {
            stats: DashboardStats::from_totals(12, 9),
            recent_students: Vec::new(),
        };
        let html = dashboard(&summary, "Welcome back").into_string();
        assert!(html.contains("Total Students"));
        assert!(html.contains(">12<"));
        assert!(html.contains(">3<"));
        assert!(html.contains("No students yet"));
    }
}
