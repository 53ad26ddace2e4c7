use registrar_core::{Envelope, ErrorCode};
use registrar_models::{
    DashboardStats, DashboardSummary, SortDirection, StudentField, StudentStatus,
    dashboard::RECENT_STUDENTS,
};
use tracing::{instrument, warn};

use crate::modules::students::query::FetchStudentsOptions;
use crate::modules::students::service::StudentService;

pub const LOAD_ERROR: &str = "Failed to load student data";

/// Aggregate statistics and the latest enrolments.
#[derive(Debug, Clone)]
pub struct DashboardService {
    students: StudentService,
}

impl DashboardService {
    pub fn new(students: StudentService) -> Self {
        Self { students }
    }

    /// Issues the three store queries concurrently. Totals come from
    /// one-record pages so only counts cross the wire.
    #[instrument(skip(self))]
    pub async fn summary(&self) -> Envelope<DashboardSummary> {
        let recent = FetchStudentsOptions::default()
            .with_limit(RECENT_STUDENTS)
            .sorted(StudentField::EnrollmentDate, SortDirection::Desc);
        let all = FetchStudentsOptions::default().with_limit(1);
        let active = FetchStudentsOptions::default()
            .with_limit(1)
            .with_status(StudentStatus::Active);

        let (recent, all, active) = tokio::join!(
            self.students.fetch_students(&recent),
            self.students.fetch_students(&all),
            self.students.fetch_students(&active),
        );

        if let Some(failed) = [&recent, &all, &active].into_iter().find(|r| !r.success) {
            warn!(error = failed.error_message(), "Dashboard query failed");
            let code = failed.code.unwrap_or(ErrorCode::StoreError);
            return Envelope::failure(DashboardSummary::default(), code, LOAD_ERROR);
        }

        Envelope::ok(DashboardSummary {
            stats: DashboardStats::from_totals(
                all.total.unwrap_or_default(),
                active.total.unwrap_or_default(),
            ),
            recent_students: recent.data,
        })
    }
}
