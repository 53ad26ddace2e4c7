//! Command-line operations over the record store.
//!
//! The `registrar-cli` binary parses arguments and delegates here, so every
//! command goes through the same service and list controller as the web
//! pages.

pub mod seed;

use std::fmt::Write as _;

use anyhow::{Result, anyhow};
use registrar_core::PageState;
use registrar_models::{SortDirection, Student, StudentField, StudentFilters, StudentStatus, StudentYear};

use crate::modules::students::list::{ListState, LoadOutcome, StudentListController};
use crate::modules::students::service::StudentService;
use crate::utils::format::{long_date, or_placeholder, short_date};

/// Arguments of `registrar-cli list`.
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub search: Option<String>,
    pub status: Option<StudentStatus>,
    pub year: Option<StudentYear>,
    pub sort: Option<StudentField>,
    pub descending: bool,
    pub page: u64,
    pub limit: u64,
}

/// Loads one page of students the same way the list page does, falling
/// back to the first page when `args.page` is past the end.
pub async fn list_students(service: StudentService, args: &ListArgs) -> Result<ListState> {
    let defaults = StudentFilters::default();
    let filters = StudentFilters {
        search_term: args.search.clone().unwrap_or_default(),
        status: args.status,
        year: args.year,
        sort_field: args.sort.unwrap_or(defaults.sort_field),
        sort_direction: if args.descending {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        },
    };
    let initial = ListState {
        filters,
        pagination: PageState::new(0, args.page.max(1), args.limit.max(1)),
        ..Default::default()
    };

    let controller = StudentListController::with_state(service, initial);
    let mut outcome = controller.reload().await;
    if outcome == LoadOutcome::Applied {
        let pagination = controller.snapshot().pagination;
        if pagination.total > 0 && !pagination.contains_page(pagination.current_page) {
            // Same fallback as the list page: past the end means page 1.
            outcome = controller.change_page(1).await.unwrap_or(outcome);
        }
    }

    match outcome {
        LoadOutcome::Applied => Ok(controller.snapshot()),
        LoadOutcome::Failed | LoadOutcome::Superseded => {
            let state = controller.snapshot();
            Err(anyhow!(
                state.error.unwrap_or_else(|| "Failed to load students".to_string())
            ))
        }
    }
}

/// Plain-text table of a loaded page.
pub fn render_table(state: &ListState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:<28} {:<32} {:<24} {:<10} {:<12} {:<9}",
        "ID", "NAME", "EMAIL", "PROGRAM", "YEAR", "ENROLLED", "STATUS"
    );
    for student in &state.students {
        let _ = writeln!(
            out,
            "{:<6} {:<28} {:<32} {:<24} {:<10} {:<12} {:<9}",
            student.id,
            student.full_name(),
            or_placeholder(&student.email),
            or_placeholder(&student.program),
            student.year.as_str(),
            short_date(student.enrollment_date),
            student.status.label(),
        );
    }
    let (from, to) = state.display_range();
    let _ = write!(
        out,
        "\nShowing {from} to {to} of {} students (page {} of {})",
        state.pagination.total,
        state.pagination.current_page,
        state.pagination.total_pages().max(1)
    );
    out
}

pub fn render_student(student: &Student) -> String {
    [
        format!("{} (#{})", student.full_name(), student.id),
        format!("  Email:           {}", or_placeholder(&student.email)),
        format!("  Phone:           {}", or_placeholder(&student.phone)),
        format!("  Date of Birth:   {}", long_date(student.dob)),
        format!("  Program:         {}", or_placeholder(&student.program)),
        format!("  Year:            {}", student.year.as_str()),
        format!("  Enrollment Date: {}", long_date(student.enrollment_date)),
        format!("  Status:          {}", student.status.label()),
    ]
    .join("\n")
}
