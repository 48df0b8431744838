//! Admin dashboard aggregates.

use serde::Serialize;

/// Job counts by status.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct JobCounts {
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub total: i64,
}

/// Invoice totals grouped by status.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InvoiceTotals {
    pub unpaid_amount: f64,
    pub paid_amount: f64,
    pub overdue_amount: f64,
    pub total_count: i64,
}

/// Response for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DashboardResponse {
    pub jobs: JobCounts,
    pub invoices: InvoiceTotals,
}
