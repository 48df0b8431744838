//! Invoice repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::InvoiceEntity;
use crate::metrics::QueryTimer;

/// Repository for invoice database operations.
#[derive(Clone)]
pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Ensure exactly one invoice exists for a job.
    ///
    /// Uses INSERT ... ON CONFLICT (job_id) DO NOTHING so that concurrent
    /// first requests for the same job cannot create duplicates, then
    /// fetches the row (either newly created or existing).
    /// Returns (entity, was_created) tuple.
    pub async fn ensure_invoice(
        &self,
        job_id: Uuid,
        subcontractor_id: Uuid,
        total_amount: f64,
    ) -> Result<(InvoiceEntity, bool), sqlx::Error> {
        let timer = QueryTimer::new("ensure_invoice");

        let insert_result = sqlx::query(
            r#"
            INSERT INTO invoices (job_id, subcontractor_id, total_amount)
            VALUES ($1, $2, $3)
            ON CONFLICT (job_id) DO NOTHING
            "#,
        )
        .bind(job_id)
        .bind(subcontractor_id)
        .bind(total_amount)
        .execute(&self.pool)
        .await?;

        let was_created = insert_result.rows_affected() > 0;

        // Fetch the invoice (whether newly created or existing). RowNotFound
        // here means the job row vanished between insert and fetch.
        let entity = self
            .find_by_job_id(job_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        timer.record();
        Ok((entity, was_created))
    }

    /// Find invoice by job ID.
    pub async fn find_by_job_id(
        &self,
        job_id: Uuid,
    ) -> Result<Option<InvoiceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_invoice_by_job_id");
        let result = sqlx::query_as::<_, InvoiceEntity>(
            r#"
            SELECT id, job_id, subcontractor_id, invoice_date, due_date, status, total_amount, created_at, updated_at
            FROM invoices
            WHERE job_id = $1
            "#,
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find invoice by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<InvoiceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_invoice_by_id");
        let result = sqlx::query_as::<_, InvoiceEntity>(
            r#"
            SELECT id, job_id, subcontractor_id, invoice_date, due_date, status, total_amount, created_at, updated_at
            FROM invoices
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List invoices, newest first. `owner` restricts to one subcontractor.
    pub async fn list_invoices(
        &self,
        owner: Option<Uuid>,
    ) -> Result<Vec<InvoiceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_invoices");
        let result = sqlx::query_as::<_, InvoiceEntity>(
            r#"
            SELECT id, job_id, subcontractor_id, invoice_date, due_date, status, total_amount, created_at, updated_at
            FROM invoices
            WHERE ($1::uuid IS NULL OR subcontractor_id = $1)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Set an invoice's status (admin operation). All transitions are
    /// permitted, including paid back to unpaid.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<Option<InvoiceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("set_invoice_status");
        let result = sqlx::query_as::<_, InvoiceEntity>(
            r#"
            UPDATE invoices
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, job_id, subcontractor_id, invoice_date, due_date, status, total_amount, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
