use std::sync::Arc;

use registrar_client::{
    ClientError, DeletePayload, MutationResponse, RecordClient, RecordsPayload, build_client,
};
use registrar_config::StoreConfig;
use registrar_core::{Envelope, ErrorCode};
use registrar_models::{Student, StudentId, StudentInput};
use registrar_observability::{
    track_store_failure, track_student_created, track_student_deleted, track_student_updated,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::modules::students::query::{FetchStudentsOptions, STUDENT_TABLE, build_fetch_params};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Failed to initialize record store client")]
    ClientUnavailable,
    #[error("Student ID is required for updates")]
    MissingId,
    #[error("Student not found")]
    NotFound,
    #[error("{0}")]
    Rejected(String),
    #[error("Invalid student record: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl ServiceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::ClientUnavailable => ErrorCode::ClientUnavailable,
            ServiceError::MissingId => ErrorCode::InvalidRequest,
            ServiceError::NotFound => ErrorCode::NotFound,
            ServiceError::Client(e) if e.is_not_found() => ErrorCode::NotFound,
            ServiceError::Client(ClientError::Config(_)) => ErrorCode::ClientUnavailable,
            ServiceError::Rejected(_) | ServiceError::Malformed(_) | ServiceError::Client(_) => {
                ErrorCode::StoreError
            }
        }
    }
}

/// Student operations over the record store.
///
/// Every operation answers with an [`Envelope`]; failures are logged,
/// counted and folded into `success: false`.
#[derive(Debug, Clone)]
pub struct StudentService {
    client: Option<Arc<dyn RecordClient>>,
}

impl StudentService {
    pub fn new(client: Arc<dyn RecordClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// A service whose client could not be built; every call fails.
    pub fn unavailable() -> Self {
        Self { client: None }
    }

    /// Builds the record client from configuration. Missing credentials are
    /// logged and leave the service unavailable.
    pub fn from_config(config: &StoreConfig) -> Self {
        match build_client(config) {
            Ok(client) => Self::new(client),
            Err(e) => {
                error!(error = %e, "Failed to initialize record store client");
                Self::unavailable()
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    fn client(&self) -> Result<&Arc<dyn RecordClient>, ServiceError> {
        self.client.as_ref().ok_or(ServiceError::ClientUnavailable)
    }

    #[instrument(skip(self))]
    pub async fn fetch_students(&self, options: &FetchStudentsOptions) -> Envelope<Vec<Student>> {
        match self.try_fetch_students(options).await {
            Ok((students, total)) => Envelope::page(students, total),
            Err(e) => failure("fetch", Vec::new(), e).with_total(0),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_student_by_id(&self, id: StudentId) -> Envelope<Option<Student>> {
        match self.try_get_student(id).await {
            Ok(student) => Envelope::ok(Some(student)),
            Err(e) => failure("get", None, e),
        }
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_student(&self, input: StudentInput) -> Envelope<Option<Student>> {
        match self.try_create_student(input).await {
            Ok(student) => {
                track_student_created();
                info!(student_id = student.id, "Student created");
                Envelope::ok(Some(student))
            }
            Err(e) => failure("create", None, e),
        }
    }

    #[instrument(skip(self, input), fields(student_id = ?input.id))]
    pub async fn update_student(&self, input: StudentInput) -> Envelope<Option<Student>> {
        match self.try_update_student(input).await {
            Ok(student) => {
                track_student_updated();
                info!(student_id = student.id, "Student updated");
                Envelope::ok(Some(student))
            }
            Err(e) => failure("update", None, e),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_student(&self, id: StudentId) -> Envelope<Option<Student>> {
        match self.try_delete_student(id).await {
            Ok(()) => {
                track_student_deleted();
                info!(student_id = id, "Student deleted");
                Envelope::ok(None)
            }
            Err(e) => failure("delete", None, e),
        }
    }

    async fn try_fetch_students(
        &self,
        options: &FetchStudentsOptions,
    ) -> Result<(Vec<Student>, u64), ServiceError> {
        let client = self.client()?;
        let params = build_fetch_params(options);
        let response = client.fetch_records(STUDENT_TABLE, &params).await?;

        let students = response
            .data
            .unwrap_or_default()
            .into_iter()
            .map(serde_json::from_value::<Student>)
            .collect::<Result<Vec<_>, _>>()?;
        let total = response.total.unwrap_or(students.len() as u64);

        Ok((students, total))
    }

    async fn try_get_student(&self, id: StudentId) -> Result<Student, ServiceError> {
        let client = self.client()?;
        let response = client.get_record_by_id(STUDENT_TABLE, id).await?;
        match response.data {
            Some(Value::Null) | None => Err(ServiceError::NotFound),
            Some(record) => Ok(serde_json::from_value(record)?),
        }
    }

    async fn try_create_student(&self, input: StudentInput) -> Result<Student, ServiceError> {
        let client = self.client()?;
        let payload = RecordsPayload {
            records: vec![serde_json::to_value(input.without_id())?],
        };
        let response = client.create_record(STUDENT_TABLE, &payload).await?;
        stored_record(&response, "Failed to create student record")
    }

    async fn try_update_student(&self, input: StudentInput) -> Result<Student, ServiceError> {
        if input.record_id().is_none() {
            return Err(ServiceError::MissingId);
        }
        let client = self.client()?;
        let payload = RecordsPayload {
            records: vec![serde_json::to_value(&input)?],
        };
        let response = client.update_record(STUDENT_TABLE, &payload).await?;
        stored_record(&response, "Failed to update student record")
    }

    async fn try_delete_student(&self, id: StudentId) -> Result<(), ServiceError> {
        let client = self.client()?;
        let payload = DeletePayload {
            record_ids: vec![id],
        };
        let response = client.delete_record(STUDENT_TABLE, &payload).await?;
        if response.success {
            Ok(())
        } else {
            Err(ServiceError::Rejected(
                response
                    .message
                    .unwrap_or_else(|| "Failed to delete student record".to_string()),
            ))
        }
    }
}

fn stored_record(response: &MutationResponse, fallback: &str) -> Result<Student, ServiceError> {
    match response.first_record() {
        Some(record) => Ok(serde_json::from_value(record.clone())?),
        None => {
            let message = response
                .message
                .clone()
                .or_else(|| response.results.iter().find_map(|r| r.message.clone()))
                .unwrap_or_else(|| fallback.to_string());
            Err(ServiceError::Rejected(message))
        }
    }
}

fn failure<T>(operation: &str, data: T, e: ServiceError) -> Envelope<T> {
    error!(operation, error = %e, "Student operation failed");
    track_store_failure(operation);
    Envelope::failure(data, e.code(), e.to_string())
}
