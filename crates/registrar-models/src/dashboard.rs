use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::students::Student;

/// Number of most recently enrolled students shown on the dashboard.
pub const RECENT_STUDENTS: u64 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_students: u64,
    pub active_students: u64,
    pub inactive_students: u64,
}

impl DashboardStats {
    /// Inactive count is derived; the store only reports totals.
    pub fn from_totals(total: u64, active: u64) -> Self {
        Self {
            total_students: total,
            active_students: active.min(total),
            inactive_students: total.saturating_sub(active),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    pub recent_students: Vec<Student>,
}
