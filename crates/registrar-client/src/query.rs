//! Wire types of the record store API.
//!
//! A fetch request looks like:
//!
//! ```json
//! {
//!   "fields": [{ "field": { "name": "Id" } }, { "field": { "name": "firstName" } }],
//!   "orderBy": [{ "field": "lastName", "direction": "asc" }],
//!   "pagingInfo": { "limit": 10, "offset": 0 },
//!   "where": [{ "fieldName": "status", "operator": "ExactMatch", "values": ["active"] }],
//!   "whereGroups": [{ "operator": "OR", "conditions": [...] }]
//! }
//! ```
//!
//! Records themselves are schemaless JSON objects; typed decoding happens
//! in the caller.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type RecordId = i64;
pub type Record = Map<String, Value>;

/// Name of the identifier column in every table.
pub const ID_FIELD: &str = "Id";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelector {
    pub field: FieldName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldName {
    pub name: String,
}

impl FieldSelector {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            field: FieldName { name: name.into() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingInfo {
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Contains,
    ExactMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Predicate {
    pub field_name: String,
    pub operator: Operator,
    pub values: Vec<String>,
}

impl Predicate {
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field_name: field.into(),
            operator: Operator::Contains,
            values: vec![value.into()],
        }
    }

    pub fn exact(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field_name: field.into(),
            operator: Operator::ExactMatch,
            values: vec![value.into()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupOperator {
    Or,
    And,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhereGroup {
    pub operator: GroupOperator,
    pub conditions: Vec<Predicate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchParams {
    pub fields: Vec<FieldSelector>,
    pub order_by: Vec<OrderBy>,
    pub paging_info: PagingInfo,
    /// Predicates AND-ed together. Present, possibly empty, whenever any
    /// condition exists.
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Predicate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub where_groups: Option<Vec<WhereGroup>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordsPayload {
    pub records: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePayload {
    pub record_ids: Vec<RecordId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchResponse {
    #[serde(default)]
    pub data: Option<Vec<Value>>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordResponse {
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub results: Vec<MutationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MutationResponse {
    /// Record of the first result, when the store reports success.
    pub fn first_record(&self) -> Option<&Value> {
        if !self.success {
            return None;
        }
        self.results.first().and_then(|result| result.data.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Reads an identifier that may be stored as a number or a numeric string.
pub fn record_id(value: &Value) -> Option<RecordId> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fetch_params_wire_shape() {
        let params = FetchParams {
            fields: vec![FieldSelector::new("Id")],
            order_by: vec![OrderBy {
                field: "lastName".into(),
                direction: "asc".into(),
            }],
            paging_info: PagingInfo {
                limit: 10,
                offset: 20,
            },
            conditions: Some(vec![Predicate::exact("status", "active")]),
            where_groups: Some(vec![WhereGroup {
                operator: GroupOperator::Or,
                conditions: vec![Predicate::contains("email", "davis")],
            }]),
        };

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            json!({
                "fields": [{"field": {"name": "Id"}}],
                "orderBy": [{"field": "lastName", "direction": "asc"}],
                "pagingInfo": {"limit": 10, "offset": 20},
                "where": [{"fieldName": "status", "operator": "ExactMatch", "values": ["active"]}],
                "whereGroups": [{
                    "operator": "OR",
                    "conditions": [{"fieldName": "email", "operator": "Contains", "values": ["davis"]}]
                }]
            })
        );
    }

    #[test]
    fn test_fetch_params_omits_absent_conditions() {
        let params = FetchParams {
            fields: vec![],
            order_by: vec![],
            paging_info: PagingInfo {
                limit: 10,
                offset: 0,
            },
            conditions: None,
            where_groups: None,
        };
        let json = serde_json::to_value(&params).unwrap();
        assert!(json.get("where").is_none());
        assert!(json.get("whereGroups").is_none());
    }

    #[test]
    fn test_delete_payload_shape() {
        let json = serde_json::to_value(DeletePayload {
            record_ids: vec![4],
        })
        .unwrap();
        assert_eq!(json, json!({"recordIds": [4]}));
    }

    #[test]
    fn test_mutation_first_record() {
        let response: MutationResponse = serde_json::from_value(json!({
            "success": true,
            "results": [{"success": true, "data": {"Id": 3}}]
        }))
        .unwrap();
        assert_eq!(response.first_record(), Some(&json!({"Id": 3})));

        let response: MutationResponse =
            serde_json::from_value(json!({"success": true, "results": []})).unwrap();
        assert_eq!(response.first_record(), None);

        let response: MutationResponse = serde_json::from_value(json!({
            "success": false,
            "results": [{"data": {"Id": 3}}],
            "message": "quota exceeded"
        }))
        .unwrap();
        assert_eq!(response.first_record(), None);
    }

    #[test]
    fn test_fetch_response_tolerates_missing_fields() {
        let response: FetchResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.data, None);
        assert_eq!(response.total, None);
    }

    #[test]
    fn test_record_id() {
        assert_eq!(record_id(&json!(5)), Some(5));
        assert_eq!(record_id(&json!("12")), Some(12));
        assert_eq!(record_id(&json!(null)), None);
        assert_eq!(record_id(&json!("x")), None);
    }
}
