//! Pagination utilities.
//!
//! Two views of the same window:
//!
//! - [`PaginationParams`]: what a client asks for in a query string
//!   (`limit` and either `page` or `offset`).
//! - [`PageState`]: what a list screen holds after a fetch (total reported
//!   by the store, current page, page size), with the arithmetic used by
//!   the "Showing X to Y of Z" footer and the page buttons.
//!
//! # Limits
//!
//! - `limit` is clamped to the range [1, 100], default 10
//! - `page` is 1-indexed and clamped to a minimum of 1
//! - `offset` is clamped to a minimum of 0
//! - offsets derived from a page saturate at `u64::MAX` instead of wrapping
//!
//! # Example
//!
//! ```ignore
//! // GET /api/students?limit=20&page=3
//! let params = PaginationParams { limit: Some(20), offset: None, page: Some(3) };
//! assert_eq!(params.offset(), 40);
//!
//! let state = PageState::new(45, 3, 20);
//! assert_eq!(state.total_pages(), 3);
//! assert_eq!((state.showing_from(), state.showing_to()), (41, 45));
//! ```

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::serde::empty_string_as_none;

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Query parameters for pagination.
///
/// When `page` is provided, it takes precedence over `offset`.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Maximum number of items to return (1-100, default: 10)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub limit: Option<u64>,
    /// Number of items to skip (default: 0, ignored if `page` is set)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub offset: Option<u64>,
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<u64>,
}

impl PaginationParams {
    /// Returns the effective limit, clamped to [1, 100].
    #[must_use]
    pub fn limit(&self) -> u64 {
        clamp_limit(self.limit.unwrap_or(DEFAULT_LIMIT))
    }

    /// Returns the effective offset, derived from `page` when present.
    #[must_use]
    pub fn offset(&self) -> u64 {
        match self.page {
            Some(page) => (page.max(1) - 1).saturating_mul(self.limit()),
            None => self.offset.unwrap_or(0),
        }
    }

    /// Returns the effective 1-indexed page.
    #[must_use]
    pub fn page(&self) -> u64 {
        match self.page {
            Some(page) => page.max(1),
            None => self.offset() / self.limit() + 1,
        }
    }
}

fn clamp_limit(limit: u64) -> u64 {
    limit.clamp(1, MAX_LIMIT)
}

/// Pagination state of a list view.
///
/// `total` is whatever the record store last reported; it is never
/// computed locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    pub total: u64,
    pub current_page: u64,
    pub limit: u64,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            total: 0,
            current_page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageState {
    pub fn new(total: u64, current_page: u64, limit: u64) -> Self {
        Self {
            total,
            current_page: current_page.max(1),
            limit: clamp_limit(limit),
        }
    }

    /// `ceil(total / limit)`, zero when there are no records.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.limit)
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        (self.current_page.max(1) - 1).saturating_mul(self.limit)
    }

    /// Whether `page` is a valid navigation target (`1..=total_pages`).
    #[must_use]
    pub fn contains_page(&self, page: u64) -> bool {
        page >= 1 && page <= self.total_pages()
    }

    /// 1-based position of the first row on the page, 0 for an empty result.
    #[must_use]
    pub fn showing_from(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            self.offset().saturating_add(1)
        }
    }

    /// `min(showing_from + limit - 1, total)`.
    #[must_use]
    pub fn showing_to(&self) -> u64 {
        self.showing_from()
            .saturating_add(self.limit - 1)
            .min(self.total)
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_params_default() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
        assert_eq!(params.page(), 1);
    }

    #[test]
    fn test_pagination_params_limit_min_boundary() {
        let params = PaginationParams {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_pagination_params_limit_max_boundary() {
        let params = PaginationParams {
            limit: Some(150),
            ..Default::default()
        };
        assert_eq!(params.limit(), 100);
    }

    #[test]
    fn test_pagination_params_page_takes_precedence() {
        let params = PaginationParams {
            limit: Some(20),
            offset: Some(5),
            page: Some(3),
        };
        assert_eq!(params.offset(), 40);
        assert_eq!(params.page(), 3);
    }

    #[test]
    fn test_pagination_params_page_from_offset() {
        let params = PaginationParams {
            limit: Some(10),
            offset: Some(30),
            page: None,
        };
        assert_eq!(params.page(), 4);
    }

    #[test]
    fn test_pagination_params_page_zero_clamped() {
        let params = PaginationParams {
            limit: Some(10),
            offset: None,
            page: Some(0),
        };
        assert_eq!(params.offset(), 0);
        assert_eq!(params.page(), 1);
    }

    #[test]
    fn test_pagination_params_deserialize_with_values() {
        let json = r#"{"limit":"25","page":"2"}"#;
        let params: PaginationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 25);
    }

    #[test]
    fn test_pagination_params_deserialize_empty_strings() {
        let json = r#"{"limit":"","offset":"","page":""}"#;
        let params: PaginationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params, PaginationParams::default());
    }

    #[test]
    fn test_page_state_total_pages() {
        assert_eq!(PageState::new(0, 1, 10).total_pages(), 0);
        assert_eq!(PageState::new(10, 1, 10).total_pages(), 1);
        assert_eq!(PageState::new(11, 1, 10).total_pages(), 2);
        assert_eq!(PageState::new(23, 1, 5).total_pages(), 5);
    }

    #[test]
    fn test_page_state_showing_range_empty() {
        let state = PageState::new(0, 1, 10);
        assert_eq!(state.showing_from(), 0);
        assert_eq!(state.showing_to(), 0);
    }

    #[test]
    fn test_page_state_showing_range_first_page() {
        let state = PageState::new(23, 1, 10);
        assert_eq!(state.showing_from(), 1);
        assert_eq!(state.showing_to(), 10);
    }

    #[test]
    fn test_page_state_showing_range_last_partial_page() {
        let state = PageState::new(23, 3, 10);
        assert_eq!(state.showing_from(), 21);
        assert_eq!(state.showing_to(), 23);
    }

    #[test]
    fn test_page_state_contains_page() {
        let state = PageState::new(23, 1, 10);
        assert!(!state.contains_page(0));
        assert!(state.contains_page(1));
        assert!(state.contains_page(3));
        assert!(!state.contains_page(4));
    }

    #[test]
    fn test_page_state_no_pages_when_empty() {
        let state = PageState::new(0, 1, 10);
        assert!(!state.contains_page(1));
        assert!(!state.has_next());
        assert!(!state.has_previous());
    }

    #[test]
    fn test_page_state_new_clamps() {
        let state = PageState::new(5, 0, 0);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.limit, 1);
    }

    #[test]
    fn test_pagination_params_huge_page_saturates() {
        let params = PaginationParams {
            limit: Some(10),
            offset: None,
            page: Some(u64::MAX),
        };
        assert_eq!(params.offset(), u64::MAX);
        assert_eq!(params.page(), u64::MAX);
    }

    #[test]
    fn test_page_state_huge_page_saturates() {
        let state = PageState::new(25, u64::MAX, 10);
        assert_eq!(state.offset(), u64::MAX);
        assert!(!state.contains_page(state.current_page));
        assert!(!state.has_next());

        let empty = PageState::new(0, u64::MAX, 10);
        assert_eq!(empty.offset(), u64::MAX);
        assert_eq!((empty.showing_from(), empty.showing_to()), (0, 0));
    }

    #[test]
    fn test_page_state_serialize_camel_case() {
        let json = serde_json::to_value(PageState::new(40, 2, 10)).unwrap();
        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["total"], 40);
    }
}
