//! In-process record store.
//!
//! Implements the same query semantics as the hosted store so the whole
//! application can run without network access:
//!
//! - `Contains` is a case-insensitive substring match, `ExactMatch` is string equality
//! - `where` predicates are AND-ed, each `whereGroups` entry is combined with its own
//!   operator and the groups are AND-ed with `where`
//! - `total` counts every match before the paging window is applied
//! - identifiers are assigned sequentially from 1

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;

use crate::RecordClient;
use crate::error::ClientError;
use crate::query::{
    DeletePayload, DeleteResponse, FetchParams, FetchResponse, GroupOperator, ID_FIELD,
    MutationResponse, MutationResult, Operator, Predicate, Record, RecordId, RecordResponse,
    RecordsPayload, record_id,
};

#[derive(Debug, Default)]
struct Table {
    next_id: RecordId,
    records: BTreeMap<RecordId, Record>,
}

impl Table {
    fn insert(&mut self, mut record: Record) -> Record {
        self.next_id += 1;
        let id = self.next_id;
        record.insert(ID_FIELD.to_string(), Value::from(id));
        self.records.insert(id, record.clone());
        record
    }
}

#[derive(Debug, Default)]
pub struct MemoryRecordClient {
    tables: Mutex<HashMap<String, Table>>,
    requests: AtomicUsize,
    failure: Mutex<Option<String>>,
}

impl MemoryRecordClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `records` into `table`, assigning identifiers.
    pub fn seed(&self, table: &str, records: impl IntoIterator<Item = Value>) -> Vec<RecordId> {
        let mut tables = self.lock_tables();
        let table = tables.entry(table.to_string()).or_default();
        records
            .into_iter()
            .filter_map(|value| match value {
                Value::Object(record) => Some(table.insert(record)),
                _ => None,
            })
            .filter_map(|record| record.get(ID_FIELD).and_then(record_id))
            .collect()
    }

    /// Number of operations received so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(AtomicOrdering::SeqCst)
    }

    pub fn len(&self, table: &str) -> usize {
        self.lock_tables()
            .get(table)
            .map(|t| t.records.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, table: &str) -> bool {
        self.len(table) == 0
    }

    /// Makes every following operation fail with a 503 carrying `message`,
    /// or restores normal operation with `None`.
    pub fn fail_with(&self, message: Option<&str>) {
        *self
            .failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = message.map(str::to_string);
    }

    fn lock_tables(&self) -> std::sync::MutexGuard<'_, HashMap<String, Table>> {
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin(&self) -> Result<(), ClientError> {
        self.requests.fetch_add(1, AtomicOrdering::SeqCst);
        let failure = self
            .failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        match failure {
            Some(message) => Err(ClientError::Status {
                status: 503,
                message,
            }),
            None => Ok(()),
        }
    }
}

fn as_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn matches(record: &Record, predicate: &Predicate) -> bool {
    let actual = as_text(record.get(&predicate.field_name));
    predicate.values.iter().any(|expected| match predicate.operator {
        Operator::Contains => actual.to_lowercase().contains(&expected.to_lowercase()),
        Operator::ExactMatch => actual == *expected,
    })
}

fn selects(record: &Record, params: &FetchParams) -> bool {
    let all_conditions = params
        .conditions
        .iter()
        .flatten()
        .all(|predicate| matches(record, predicate));

    let all_groups = params.where_groups.iter().flatten().all(|group| {
        let mut conditions = group.conditions.iter();
        match group.operator {
            GroupOperator::Or => {
                group.conditions.is_empty() || conditions.any(|p| matches(record, p))
            }
            GroupOperator::And => conditions.all(|p| matches(record, p)),
        }
    });

    all_conditions && all_groups
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a.and_then(Value::as_f64), b.and_then(Value::as_f64)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => as_text(a).to_lowercase().cmp(&as_text(b).to_lowercase()),
    }
}

fn project(record: &Record, params: &FetchParams) -> Value {
    if params.fields.is_empty() {
        return Value::Object(record.clone());
    }
    let projected: Record = params
        .fields
        .iter()
        .filter_map(|selector| {
            let name = &selector.field.name;
            record.get(name).map(|v| (name.clone(), v.clone()))
        })
        .collect();
    Value::Object(projected)
}

fn into_record(value: &Value) -> Result<Record, ClientError> {
    match value {
        Value::Object(record) => Ok(record.clone()),
        other => Err(ClientError::InvalidRecord(format!(
            "expected an object, got {other}"
        ))),
    }
}

#[async_trait]
impl RecordClient for MemoryRecordClient {
    #[instrument(skip(self, params))]
    async fn fetch_records(
        &self,
        table: &str,
        params: &FetchParams,
    ) -> Result<FetchResponse, ClientError> {
        self.begin()?;
        let tables = self.lock_tables();
        let mut selected: Vec<&Record> = tables
            .get(table)
            .map(|t| t.records.values().filter(|r| selects(r, params)).collect())
            .unwrap_or_default();

        if let Some(order) = params.order_by.first() {
            let descending = order.direction.eq_ignore_ascii_case("desc");
            selected.sort_by(|a, b| {
                let ordering = compare_values(a.get(&order.field), b.get(&order.field));
                let ordering = if descending { ordering.reverse() } else { ordering };
                ordering.then_with(|| compare_values(a.get(ID_FIELD), b.get(ID_FIELD)))
            });
        }

        let total = selected.len() as u64;
        let data = selected
            .into_iter()
            .skip(params.paging_info.offset as usize)
            .take(params.paging_info.limit as usize)
            .map(|record| project(record, params))
            .collect();

        Ok(FetchResponse {
            data: Some(data),
            total: Some(total),
        })
    }

    #[instrument(skip(self))]
    async fn get_record_by_id(
        &self,
        table: &str,
        id: RecordId,
    ) -> Result<RecordResponse, ClientError> {
        self.begin()?;
        self.lock_tables()
            .get(table)
            .and_then(|t| t.records.get(&id))
            .map(|record| RecordResponse {
                data: Some(Value::Object(record.clone())),
            })
            .ok_or_else(|| ClientError::NotFound {
                table: table.to_string(),
                id,
            })
    }

    #[instrument(skip(self, payload))]
    async fn create_record(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<MutationResponse, ClientError> {
        self.begin()?;
        let records = payload
            .records
            .iter()
            .map(into_record)
            .collect::<Result<Vec<_>, _>>()?;

        let mut tables = self.lock_tables();
        let table = tables.entry(table.to_string()).or_default();
        let results: Vec<MutationResult> = records
            .into_iter()
            .map(|mut record| {
                record.remove(ID_FIELD);
                MutationResult {
                    success: true,
                    data: Some(Value::Object(table.insert(record))),
                    message: None,
                }
            })
            .collect();

        Ok(MutationResponse {
            success: true,
            results,
            message: None,
        })
    }

    #[instrument(skip(self, payload))]
    async fn update_record(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> Result<MutationResponse, ClientError> {
        self.begin()?;
        let records = payload
            .records
            .iter()
            .map(into_record)
            .collect::<Result<Vec<_>, _>>()?;

        let mut tables = self.lock_tables();
        let table = tables.entry(table.to_string()).or_default();
        let results: Vec<MutationResult> = records
            .into_iter()
            .map(|mut record| {
                let id = record.get(ID_FIELD).and_then(record_id);
                match id.filter(|id| table.records.contains_key(id)) {
                    Some(id) => {
                        record.insert(ID_FIELD.to_string(), Value::from(id));
                        table.records.insert(id, record.clone());
                        MutationResult {
                            success: true,
                            data: Some(Value::Object(record)),
                            message: None,
                        }
                    }
                    None => MutationResult {
                        success: false,
                        data: None,
                        message: Some("Record not found".to_string()),
                    },
                }
            })
            .collect();

        let success = results.iter().all(|r| r.success);
        Ok(MutationResponse {
            success,
            message: (!success).then(|| "Record not found".to_string()),
            results,
        })
    }

    #[instrument(skip(self, payload))]
    async fn delete_record(
        &self,
        table: &str,
        payload: &DeletePayload,
    ) -> Result<DeleteResponse, ClientError> {
        self.begin()?;
        let mut tables = self.lock_tables();
        let table = tables.entry(table.to_string()).or_default();
        let missing: Vec<RecordId> = payload
            .record_ids
            .iter()
            .copied()
            .filter(|id| table.records.remove(id).is_none())
            .collect();

        if missing.is_empty() {
            Ok(DeleteResponse {
                success: true,
                message: None,
            })
        } else {
            Ok(DeleteResponse {
                success: false,
                message: Some(format!("Records not found: {missing:?}")),
            })
        }
    }
}
