//! Job repository for database operations.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::JobEntity;
use crate::metrics::QueryTimer;

/// Access scope applied to job lookups.
///
/// Administrators see any job; subcontractors only see their own. Handlers
/// pass this down instead of duplicating ownership filters per route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobScope {
    /// No ownership filter (admin).
    Any,
    /// Restrict to jobs owned by the given subcontractor.
    Owned(Uuid),
}

impl JobScope {
    fn owner(&self) -> Option<Uuid> {
        match self {
            JobScope::Any => None,
            JobScope::Owned(id) => Some(*id),
        }
    }
}

/// Input data for inserting a job.
#[derive(Debug, Clone)]
pub struct JobInput {
    pub subcontractor_id: Uuid,
    pub job_type: String,
    pub location: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub line_items: Option<Value>,
}

/// Input data for updating a pending job. `None` fields keep current values.
#[derive(Debug, Clone, Default)]
pub struct JobUpdateInput {
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub line_items: Option<Value>,
}

/// Query parameters for job listings.
#[derive(Debug, Clone)]
pub struct JobQuery {
    pub scope: JobScope,
    pub status: Option<String>,
    pub cursor: Option<(DateTime<Utc>, Uuid)>,
    pub limit: i64,
}

/// Repository for job database operations.
#[derive(Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    /// Creates a new JobRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a new job in pending status.
    pub async fn create_job(&self, input: JobInput) -> Result<JobEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_job");
        let result = sqlx::query_as::<_, JobEntity>(
            r#"
            INSERT INTO jobs (subcontractor_id, job_type, location, start_date, end_date, notes, line_items)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, subcontractor_id, job_type, location, start_date, end_date, status, notes, line_items, created_at, updated_at
            "#,
        )
        .bind(input.subcontractor_id)
        .bind(&input.job_type)
        .bind(&input.location)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(&input.notes)
        .bind(&input.line_items)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a job by ID within the given access scope.
    pub async fn find_scoped(
        &self,
        id: Uuid,
        scope: JobScope,
    ) -> Result<Option<JobEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_job_scoped");
        let result = sqlx::query_as::<_, JobEntity>(
            r#"
            SELECT id, subcontractor_id, job_type, location, start_date, end_date, status, notes, line_items, created_at, updated_at
            FROM jobs
            WHERE id = $1 AND ($2::uuid IS NULL OR subcontractor_id = $2)
            "#,
        )
        .bind(id)
        .bind(scope.owner())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List jobs within a scope, newest first, cursor-paginated.
    ///
    /// Fetches `limit + 1` rows so the caller can detect whether another
    /// page exists.
    pub async fn list_jobs(&self, query: JobQuery) -> Result<Vec<JobEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_jobs");
        let (cursor_ts, cursor_id) = match query.cursor {
            Some((ts, id)) => (Some(ts), Some(id)),
            None => (None, None),
        };
        let result = sqlx::query_as::<_, JobEntity>(
            r#"
            SELECT id, subcontractor_id, job_type, location, start_date, end_date, status, notes, line_items, created_at, updated_at
            FROM jobs
            WHERE ($1::uuid IS NULL OR subcontractor_id = $1)
              AND ($2::text IS NULL OR status = $2)
              AND ($3::timestamptz IS NULL OR (created_at, id) < ($3, $4))
            ORDER BY created_at DESC, id DESC
            LIMIT $5
            "#,
        )
        .bind(query.scope.owner())
        .bind(&query.status)
        .bind(cursor_ts)
        .bind(cursor_id)
        .bind(query.limit + 1)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a pending job owned by the given subcontractor.
    ///
    /// Returns `None` when the job does not exist, is not owned by the
    /// caller, or has left pending status.
    pub async fn update_pending(
        &self,
        id: Uuid,
        owner: Uuid,
        input: JobUpdateInput,
    ) -> Result<Option<JobEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_pending_job");
        let result = sqlx::query_as::<_, JobEntity>(
            r#"
            UPDATE jobs
            SET job_type = COALESCE($3, job_type),
                location = COALESCE($4, location),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date),
                notes = COALESCE($7, notes),
                line_items = COALESCE($8, line_items),
                updated_at = NOW()
            WHERE id = $1 AND subcontractor_id = $2 AND status = 'pending'
            RETURNING id, subcontractor_id, job_type, location, start_date, end_date, status, notes, line_items, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(&input.job_type)
        .bind(&input.location)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(&input.notes)
        .bind(&input.line_items)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a pending job owned by the given subcontractor.
    ///
    /// Returns the number of rows deleted (0 when missing, not owned, or
    /// no longer pending).
    pub async fn delete_pending(&self, id: Uuid, owner: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_pending_job");
        let result = sqlx::query(
            r#"
            DELETE FROM jobs
            WHERE id = $1 AND subcontractor_id = $2 AND status = 'pending'
            "#,
        )
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Set a job's status (admin operation).
    pub async fn set_status(
        &self,
        id: Uuid,
        status: &str,
    ) -> Result<Option<JobEntity>, sqlx::Error> {
        let timer = QueryTimer::new("set_job_status");
        let result = sqlx::query_as::<_, JobEntity>(
            r#"
            UPDATE jobs
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, subcontractor_id, job_type, location, start_date, end_date, status, notes, line_items, created_at, updated_at
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
