//! Filter, sort and list query types for student listings.

use std::fmt;
use std::str::FromStr;

use registrar_core::pagination::PaginationParams;
use registrar_core::serde::empty_string_as_none;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::students::{StudentField, StudentStatus, StudentYear};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction '{other}'")),
        }
    }
}

/// Filter and sort state of the student list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentFilters {
    pub search_term: String,
    pub status: Option<StudentStatus>,
    pub year: Option<StudentYear>,
    pub sort_field: StudentField,
    pub sort_direction: SortDirection,
}

impl Default for StudentFilters {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            status: None,
            year: None,
            sort_field: StudentField::LastName,
            sort_direction: SortDirection::Asc,
        }
    }
}

impl StudentFilters {
    /// Whether any narrowing filter is active. Sort order does not count.
    pub fn is_filtered(&self) -> bool {
        !self.search_term.trim().is_empty() || self.status.is_some() || self.year.is_some()
    }

    /// Same field flips the direction; a new field starts ascending.
    #[must_use]
    pub fn sorted_by(mut self, field: StudentField) -> Self {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Asc;
        }
        self
    }

    /// Direction `field` would get if clicked now.
    pub fn next_direction(&self, field: StudentField) -> SortDirection {
        if self.sort_field == field {
            self.sort_direction.toggled()
        } else {
            SortDirection::Asc
        }
    }
}

/// Query string of list endpoints and the list page.
///
/// ```text
/// ?search=davis&status=active&year=Junior&sort=enrollmentDate&direction=desc&page=2&limit=10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentListQuery {
    /// Substring matched against first name, last name, email and program
    #[serde(default)]
    pub search: Option<String>,
    /// `active` or `inactive`
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[param(value_type = Option<String>)]
    pub status: Option<StudentStatus>,
    /// `Freshman`, `Sophomore`, `Junior` or `Senior`
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[param(value_type = Option<String>)]
    pub year: Option<StudentYear>,
    /// Field to sort by (default `lastName`)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[param(value_type = Option<String>)]
    pub sort: Option<StudentField>,
    /// `asc` or `desc` (default `asc`)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[param(value_type = Option<String>)]
    pub direction: Option<SortDirection>,
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<u64>,
    /// Items per page (1-100, default: 10)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub limit: Option<u64>,
}

impl StudentListQuery {
    pub fn filters(&self) -> StudentFilters {
        let defaults = StudentFilters::default();
        StudentFilters {
            search_term: self.search.clone().unwrap_or_default(),
            status: self.status,
            year: self.year,
            sort_field: self.sort.unwrap_or(defaults.sort_field),
            sort_direction: self.direction.unwrap_or(defaults.sort_direction),
        }
    }

    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            limit: self.limit,
            offset: None,
            page: self.page,
        }
    }

    /// Rebuilds the query string for links that keep the current state.
    pub fn from_state(filters: &StudentFilters, page: u64, limit: u64) -> Self {
        let search = filters.search_term.trim();
        Self {
            search: (!search.is_empty()).then(|| search.to_string()),
            status: filters.status,
            year: filters.year,
            sort: Some(filters.sort_field),
            direction: Some(filters.sort_direction),
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Renders as `key=value&...`, skipping unset parameters.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(year) = self.year {
            pairs.push(("year", year.as_str().to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        if let Some(direction) = self.direction {
            pairs.push(("direction", direction.as_str().to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }

        pairs
            .into_iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(&v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_sort_by_last_name_asc() {
        let filters = StudentFilters::default();
        assert_eq!(filters.sort_field, StudentField::LastName);
        assert_eq!(filters.sort_direction, SortDirection::Asc);
        assert!(!filters.is_filtered());
    }

    #[test]
    fn test_sorted_by_same_field_toggles() {
        let filters = StudentFilters::default().sorted_by(StudentField::LastName);
        assert_eq!(filters.sort_direction, SortDirection::Desc);
        let filters = filters.sorted_by(StudentField::LastName);
        assert_eq!(filters.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn test_sorted_by_new_field_resets_to_asc() {
        let filters = StudentFilters::default()
            .sorted_by(StudentField::LastName)
            .sorted_by(StudentField::Email);
        assert_eq!(filters.sort_field, StudentField::Email);
        assert_eq!(filters.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn test_is_filtered() {
        let filters = StudentFilters {
            search_term: "  ".into(),
            ..Default::default()
        };
        assert!(!filters.is_filtered());

        let filters = StudentFilters {
            year: Some(StudentYear::Senior),
            ..Default::default()
        };
        assert!(filters.is_filtered());
    }

    #[test]
    fn test_next_direction() {
        let filters = StudentFilters::default();
        assert_eq!(
            filters.next_direction(StudentField::LastName),
            SortDirection::Desc
        );
        assert_eq!(
            filters.next_direction(StudentField::Program),
            SortDirection::Asc
        );
    }

    #[test]
    fn test_list_query_deserialize_empty_strings() {
        let query: StudentListQuery =
            serde_json::from_str(r#"{"status":"","year":"","sort":"","page":""}"#).unwrap();
        assert_eq!(query.filters(), StudentFilters::default());
        assert_eq!(query.pagination().page(), 1);
    }

    #[test]
    fn test_list_query_filters() {
        let query: StudentListQuery = serde_json::from_str(
            r#"{"search":"davis","status":"active","year":"Junior","sort":"enrollmentDate","direction":"desc","page":"2","limit":"5"}"#,
        )
        .unwrap();
        let filters = query.filters();
        assert_eq!(filters.search_term, "davis");
        assert_eq!(filters.status, Some(StudentStatus::Active));
        assert_eq!(filters.year, Some(StudentYear::Junior));
        assert_eq!(filters.sort_field, StudentField::EnrollmentDate);
        assert_eq!(filters.sort_direction, SortDirection::Desc);
        assert_eq!(query.pagination().offset(), 5);
    }

    #[test]
    fn test_to_query_string() {
        let filters = StudentFilters {
            search_term: "computer science".into(),
            status: Some(StudentStatus::Inactive),
            ..Default::default()
        };
        let query = StudentListQuery::from_state(&filters, 2, 10);
        assert_eq!(
            query.to_query_string(),
            "search=computer%20science&status=inactive&sort=lastName&direction=asc&page=2&limit=10"
        );
    }

    #[test]
    fn test_to_query_string_encodes_reserved() {
        let query = StudentListQuery {
            search: Some("a&b=c".into()),
            ..Default::default()
        };
        assert_eq!(query.to_query_string(), "search=a%26b%3Dc");
    }
}
