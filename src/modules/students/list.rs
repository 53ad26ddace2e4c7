//! Filter, sort and pagination state of the student list.
//!
//! Every state change re-fetches the current page. Each fetch takes a
//! ticket from a monotonically increasing counter; when a response arrives
//! after a newer fetch was issued it is dropped, so the newest request wins
//! no matter in which order responses resolve.
//!
//! Filter and page-size changes keep the current page even when it ends up
//! past `total_pages()`; the range then reads `from > to` until the caller
//! moves back with [`StudentListController::change_page`]. The list page
//! and the CLI redirect such loads to page 1.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use registrar_core::PageState;
use registrar_models::{Student, StudentField, StudentFilters, StudentStatus, StudentYear};
use tracing::{debug, warn};

use crate::modules::students::query::FetchStudentsOptions;
use crate::modules::students::service::StudentService;

pub const LOAD_ERROR: &str = "Failed to load students";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListState {
    pub filters: StudentFilters,
    pub pagination: PageState,
    pub students: Vec<Student>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ListState {
    pub fn options(&self) -> FetchStudentsOptions {
        FetchStudentsOptions::from_filters(
            &self.filters,
            self.pagination.limit,
            self.pagination.offset(),
        )
    }

    /// `(from, to)` of the "Showing x to y of z" line.
    pub fn display_range(&self) -> (u64, u64) {
        (self.pagination.showing_from(), self.pagination.showing_to())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed,
    /// A newer load was issued while this one was in flight.
    Superseded,
}

#[derive(Debug)]
pub struct StudentListController {
    service: StudentService,
    state: Mutex<ListState>,
    latest: AtomicU64,
}

impl StudentListController {
    pub fn new(service: StudentService) -> Self {
        Self::with_state(service, ListState::default())
    }

    pub fn with_state(service: StudentService, state: ListState) -> Self {
        Self {
            service,
            state: Mutex::new(state),
            latest: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ListState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> ListState {
        self.lock().clone()
    }

    pub async fn set_search_term(&self, term: impl Into<String>) -> LoadOutcome {
        self.lock().filters.search_term = term.into();
        self.reload().await
    }

    pub async fn set_status(&self, status: Option<StudentStatus>) -> LoadOutcome {
        self.lock().filters.status = status;
        self.reload().await
    }

    pub async fn set_year(&self, year: Option<StudentYear>) -> LoadOutcome {
        self.lock().filters.year = year;
        self.reload().await
    }

    /// Same field toggles the direction; another field starts ascending.
    pub async fn sort_by(&self, field: StudentField) -> LoadOutcome {
        {
            let mut state = self.lock();
            state.filters = std::mem::take(&mut state.filters).sorted_by(field);
        }
        self.reload().await
    }

    /// Resets search, status and year, and restores the default sort.
    pub async fn clear_filters(&self) -> LoadOutcome {
        self.lock().filters = StudentFilters::default();
        self.reload().await
    }

    /// Moves to `page`. Pages outside `1..=total_pages` leave the state
    /// untouched and issue no request.
    pub async fn change_page(&self, page: u64) -> Option<LoadOutcome> {
        {
            let mut state = self.lock();
            if !state.pagination.contains_page(page) {
                debug!(page, "Ignoring page change outside the known range");
                return None;
            }
            state.pagination.current_page = page;
        }
        Some(self.reload().await)
    }

    pub async fn set_page_size(&self, limit: u64) -> LoadOutcome {
        {
            let mut state = self.lock();
            let total = state.pagination.total;
            let page = state.pagination.current_page;
            state.pagination = PageState::new(total, page, limit);
        }
        self.reload().await
    }

    /// Fetches the page described by the current state.
    pub async fn reload(&self) -> LoadOutcome {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let options = {
            let mut state = self.lock();
            state.loading = true;
            state.options()
        };

        let response = self.service.fetch_students(&options).await;

        let mut state = self.lock();
        if self.latest.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "Discarding stale student list response");
            return LoadOutcome::Superseded;
        }
        state.loading = false;

        if response.success {
            state.students = response.data;
            state.pagination.total = response.total.unwrap_or_default();
            state.error = None;
            LoadOutcome::Applied
        } else {
            warn!(error = %response.error_message(), "Student list failed to load");
            state.error = Some(LOAD_ERROR.to_string());
            LoadOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use registrar_client::{
        ClientError, DeletePayload, DeleteResponse, FetchParams, FetchResponse, MemoryRecordClient,
        MutationResponse, RecordClient, RecordId, RecordResponse, RecordsPayload,
    };
    use registrar_models::SortDirection;
    use serde_json::json;
    use tokio::sync::Notify;

    use crate::modules::students::query::STUDENT_TABLE;

    fn memory_with(count: usize) -> Arc<MemoryRecordClient> {
        let client = Arc::new(MemoryRecordClient::new());
        client.seed(
            STUDENT_TABLE,
            (0..count).map(|i| {
                let program = if i % 2 == 0 { "Biology" } else { "History" };
                let status = if i % 3 == 0 { "inactive" } else { "active" };
                json!({
                    "firstName": format!("Student{i:02}"),
                    "lastName": format!("Last{i:02}"),
                    "email": format!("s{i}@email.com"),
                    "phone": "555-0100",
                    "dob": "2002-01-01",
                    "program": program,
                    "enrollmentDate": "2021-09-01",
                    "status": status,
                    "year": "Senior"
                })
            }),
        );
        client
    }

    async fn loaded(count: usize) -> (Arc<MemoryRecordClient>, StudentListController) {
        let client = memory_with(count);
        let controller = StudentListController::new(StudentService::new(client.clone()));
        assert_eq!(controller.reload().await, LoadOutcome::Applied);
        (client, controller)
    }

    #[tokio::test]
    async fn test_initial_load() {
        let (_, controller) = loaded(25).await;
        let state = controller.snapshot();
        assert_eq!(state.students.len(), 10);
        assert_eq!(state.pagination.total, 25);
        assert_eq!(state.display_range(), (1, 10));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_change_page_within_bounds() {
        let (_, controller) = loaded(25).await;
        assert_eq!(controller.change_page(3).await, Some(LoadOutcome::Applied));

        let state = controller.snapshot();
        assert_eq!(state.pagination.current_page, 3);
        assert_eq!(state.students.len(), 5);
        assert_eq!(state.display_range(), (21, 25));
    }

    #[tokio::test]
    async fn test_change_page_out_of_bounds_is_noop() {
        let (client, controller) = loaded(25).await;
        let before = client.request_count();

        assert_eq!(controller.change_page(0).await, None);
        assert_eq!(controller.change_page(4).await, None);
        assert_eq!(client.request_count(), before);
        assert_eq!(controller.snapshot().pagination.current_page, 1);
    }

    #[tokio::test]
    async fn test_empty_list_range() {
        let (_, controller) = loaded(0).await;
        let state = controller.snapshot();
        assert_eq!(state.display_range(), (0, 0));
        assert_eq!(controller.change_page(1).await, None);
    }

    #[tokio::test]
    async fn test_sort_toggle_and_reset() {
        let (_, controller) = loaded(5).await;

        controller.sort_by(StudentField::LastName).await;
        let state = controller.snapshot();
        assert_eq!(state.filters.sort_direction, SortDirection::Desc);
        assert_eq!(state.students[0].last_name, "Last04");

        controller.sort_by(StudentField::FirstName).await;
        let filters = controller.snapshot().filters;
        assert_eq!(filters.sort_field, StudentField::FirstName);
        assert_eq!(filters.sort_direction, SortDirection::Asc);
    }

    #[tokio::test]
    async fn test_filters_refetch_and_clear() {
        let (_, controller) = loaded(12).await;

        controller.set_search_term("biology").await;
        assert_eq!(controller.snapshot().pagination.total, 6);

        controller.set_status(Some(StudentStatus::Inactive)).await;
        assert_eq!(controller.snapshot().pagination.total, 2);

        controller.set_year(Some(StudentYear::Freshman)).await;
        assert_eq!(controller.snapshot().pagination.total, 0);

        controller.clear_filters().await;
        let state = controller.snapshot();
        assert_eq!(state.filters, StudentFilters::default());
        assert_eq!(state.pagination.total, 12);
    }

    #[tokio::test]
    async fn test_set_page_size() {
        let (_, controller) = loaded(25).await;
        controller.set_page_size(20).await;
        let state = controller.snapshot();
        assert_eq!(state.students.len(), 20);
        assert_eq!(state.pagination.total_pages(), 2);
    }

    #[tokio::test]
    async fn test_set_page_size_keeps_current_page() {
        let (_, controller) = loaded(25).await;
        controller.change_page(3).await;
        assert_eq!(controller.set_page_size(20).await, LoadOutcome::Applied);

        let state = controller.snapshot();
        assert_eq!(state.pagination.current_page, 3);
        assert!(!state.pagination.contains_page(3));
        assert!(state.students.is_empty());
        assert_eq!(state.display_range(), (41, 25));

        assert_eq!(controller.change_page(1).await, Some(LoadOutcome::Applied));
        assert_eq!(controller.snapshot().display_range(), (1, 20));
    }

    #[tokio::test]
    async fn test_failure_keeps_records() {
        let (client, controller) = loaded(3).await;
        client.fail_with(Some("down"));

        assert_eq!(controller.set_search_term("x").await, LoadOutcome::Failed);
        let state = controller.snapshot();
        assert_eq!(state.students.len(), 3);
        assert_eq!(state.error.as_deref(), Some(LOAD_ERROR));
    }

    /// Holds every query whose search group mentions "slow" until released.
    #[derive(Debug)]
    struct GatedClient {
        inner: Arc<MemoryRecordClient>,
        entered: Notify,
        release: Notify,
    }

    impl GatedClient {
        fn is_slow(params: &FetchParams) -> bool {
            params
                .where_groups
                .iter()
                .flatten()
                .flat_map(|g| &g.conditions)
                .any(|p| p.values.iter().any(|v| v == "slow"))
        }
    }

    #[async_trait]
    impl RecordClient for GatedClient {
        async fn fetch_records(
            &self,
            table: &str,
            params: &FetchParams,
        ) -> Result<FetchResponse, ClientError> {
            if Self::is_slow(params) {
                self.entered.notify_one();
                self.release.notified().await;
            }
            self.inner.fetch_records(table, params).await
        }

        async fn get_record_by_id(
            &self,
            table: &str,
            id: RecordId,
        ) -> Result<RecordResponse, ClientError> {
            self.inner.get_record_by_id(table, id).await
        }

        async fn create_record(
            &self,
            table: &str,
            payload: &RecordsPayload,
        ) -> Result<MutationResponse, ClientError> {
            self.inner.create_record(table, payload).await
        }

        async fn update_record(
            &self,
            table: &str,
            payload: &RecordsPayload,
        ) -> Result<MutationResponse, ClientError> {
            self.inner.update_record(table, payload).await
        }

        async fn delete_record(
            &self,
            table: &str,
            payload: &DeletePayload,
        ) -> Result<DeleteResponse, ClientError> {
            self.inner.delete_record(table, payload).await
        }
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let client = Arc::new(GatedClient {
            inner: memory_with(8),
            entered: Notify::new(),
            release: Notify::new(),
        });
        let controller = Arc::new(StudentListController::new(StudentService::new(
            client.clone(),
        )));

        let slow = tokio::spawn({
            let controller = controller.clone();
            async move { controller.set_search_term("slow").await }
        });
        client.entered.notified().await;

        assert_eq!(
            controller.set_search_term("history").await,
            LoadOutcome::Applied
        );
        client.release.notify_one();
        assert_eq!(slow.await.unwrap(), LoadOutcome::Superseded);

        let state = controller.snapshot();
        assert_eq!(state.pagination.total, 4);
        assert_eq!(state.students.len(), 4);
        assert!(state.students.iter().all(|s| s.program == "History"));
    }
}
