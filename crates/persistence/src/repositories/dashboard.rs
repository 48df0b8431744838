//! Dashboard repository for admin aggregate queries.

use sqlx::{FromRow, PgPool};

use crate::metrics::QueryTimer;

use domain::models::{InvoiceTotals, JobCounts};

#[derive(Debug, FromRow)]
struct JobCountRow {
    status: String,
    count: i64,
}

#[derive(Debug, FromRow)]
struct InvoiceTotalRow {
    status: String,
    amount: f64,
    count: i64,
}

/// Repository for dashboard aggregate queries.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    /// Creates a new DashboardRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Job counts grouped by status.
    pub async fn job_counts(&self) -> Result<JobCounts, sqlx::Error> {
        let timer = QueryTimer::new("dashboard_job_counts");
        let rows = sqlx::query_as::<_, JobCountRow>(
            r#"
            SELECT status, COUNT(*) AS count
            FROM jobs
            GROUP BY status
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        let mut counts = JobCounts::default();
        for row in rows {
            counts.total += row.count;
            match row.status.as_str() {
                "pending" => counts.pending = row.count,
                "in_progress" => counts.in_progress = row.count,
                "completed" => counts.completed = row.count,
                _ => {}
            }
        }
        Ok(counts)
    }

    /// Invoice amounts and count grouped by status.
    pub async fn invoice_totals(&self) -> Result<InvoiceTotals, sqlx::Error> {
        let timer = QueryTimer::new("dashboard_invoice_totals");
        let rows = sqlx::query_as::<_, InvoiceTotalRow>(
            r#"
            SELECT status, COALESCE(SUM(total_amount), 0) AS amount, COUNT(*) AS count
            FROM invoices
            GROUP BY status
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        let mut totals = InvoiceTotals::default();
        for row in rows {
            totals.total_count += row.count;
            match row.status.as_str() {
                "unpaid" => totals.unpaid_amount = row.amount,
                "paid" => totals.paid_amount = row.amount,
                "overdue" => totals.overdue_amount = row.amount,
                _ => {}
            }
        }
        Ok(totals)
    }
}
