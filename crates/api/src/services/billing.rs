//! Invoice generation pipeline.
//!
//! The one place where line-item normalization, total computation, invoice
//! materialization and document rendering are wired together. Both the
//! subcontractor and the admin PDF endpoints call into this service with
//! different access scopes; nothing else touches the pipeline.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use domain::models::{calculate_total, normalize_line_items, Invoice};
use persistence::repositories::{
    BillingSettingsRepository, InvoiceRepository, JobRepository, JobScope, ProfileRepository,
};

use crate::error::ApiError;
use crate::middleware::metrics::{record_invoice_created, record_invoice_rendered};
use crate::services::invoice_pdf::{render_invoice, InvoiceDocument, RenderError};

/// Billing pipeline errors.
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Job not found")]
    JobNotFound,

    #[error("Subcontractor profile not found")]
    ProfileNotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::JobNotFound => ApiError::NotFound("Job not found".to_string()),
            BillingError::ProfileNotFound => {
                ApiError::NotFound("Subcontractor profile not found".to_string())
            }
            BillingError::Database(e) => e.into(),
            BillingError::Render(e) => ApiError::Rendering(e.to_string()),
        }
    }
}

/// A rendered invoice document plus the row that backs it.
#[derive(Debug)]
pub struct GeneratedInvoice {
    pub invoice: Invoice,
    pub was_created: bool,
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl GeneratedInvoice {
    /// Builds the binary download response: attachment disposition keyed by
    /// job id, explicit content length, and no-store caching.
    pub fn into_pdf_response(self) -> Response {
        let content_length = self.bytes.len().to_string();
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.filename),
                ),
                (header::CONTENT_LENGTH, content_length),
                (header::CACHE_CONTROL, "no-store".to_string()),
            ],
            self.bytes,
        )
            .into_response()
    }
}

/// Service that materializes invoices and renders their documents.
pub struct InvoiceGenerator {
    pool: PgPool,
}

impl InvoiceGenerator {
    /// Create a new invoice generator over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs the full pipeline for a job within an access scope:
    /// fetch job, normalize line items, compute the total, ensure exactly
    /// one invoice row exists, and render the document.
    ///
    /// Persistence failures fail the request; a document is never returned
    /// for an invoice that could not be stored.
    pub async fn generate_for_job(
        &self,
        job_id: Uuid,
        scope: JobScope,
    ) -> Result<GeneratedInvoice, BillingError> {
        let job_repo = JobRepository::new(self.pool.clone());
        let profile_repo = ProfileRepository::new(self.pool.clone());
        let invoice_repo = InvoiceRepository::new(self.pool.clone());
        let settings_repo = BillingSettingsRepository::new(self.pool.clone());

        let job = job_repo
            .find_scoped(job_id, scope)
            .await?
            .ok_or(BillingError::JobNotFound)?
            .into_domain();

        let profile = profile_repo
            .find_by_id(job.subcontractor_id)
            .await?
            .ok_or(BillingError::ProfileNotFound)?
            .into_domain();

        let recipient_text = settings_repo.recipient_text().await?;

        let items = normalize_line_items(Some(&job.line_items));
        let total = calculate_total(&items);

        let (invoice_entity, was_created) = invoice_repo
            .ensure_invoice(job.id, job.subcontractor_id, total)
            .await?;
        let invoice = invoice_entity.into_domain();

        if was_created {
            record_invoice_created();
            info!(
                job_id = %job.id,
                invoice_id = %invoice.id,
                total_amount = total,
                item_count = items.len(),
                "Invoice materialized"
            );
        }

        let filename = format!("invoice-{}.pdf", job.id);

        let document = InvoiceDocument {
            invoice: invoice.clone(),
            job,
            company_name: profile.company_name,
            company_address: profile.address,
            recipient_text,
            items,
            total,
        };

        let bytes = render_invoice(&document)?;
        record_invoice_rendered();

        Ok(GeneratedInvoice {
            invoice,
            was_created,
            filename,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;
    use chrono::{NaiveDate, Utc};
    use domain::models::InvoiceStatus;

    fn test_generated_invoice() -> GeneratedInvoice {
        let job_id = Uuid::new_v4();
        GeneratedInvoice {
            invoice: Invoice {
                id: Uuid::new_v4(),
                job_id,
                subcontractor_id: Uuid::new_v4(),
                invoice_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
                due_date: None,
                status: InvoiceStatus::Unpaid,
                total_amount: 150.0,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            was_created: true,
            filename: format!("invoice-{}.pdf", job_id),
            bytes: b"%PDF-1.4 test".to_vec(),
        }
    }

    #[test]
    fn test_pdf_response_headers() {
        let generated = test_generated_invoice();
        let filename = generated.filename.clone();
        let len = generated.bytes.len();

        let response = generated.into_pdf_response();
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "application/pdf");
        assert_eq!(
            headers.get(header::CONTENT_DISPOSITION).unwrap(),
            &format!("attachment; filename=\"{}\"", filename)
        );
        assert_eq!(
            headers.get(header::CONTENT_LENGTH).unwrap(),
            &len.to_string()
        );
        assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "no-store");
    }

    #[test]
    fn test_filename_is_keyed_by_job_id() {
        let generated = test_generated_invoice();
        assert!(generated
            .filename
            .starts_with(&format!("invoice-{}", generated.invoice.job_id)));
        assert!(generated.filename.ends_with(".pdf"));
    }

    #[test]
    fn test_billing_error_to_api_error() {
        let err: ApiError = BillingError::JobNotFound.into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = BillingError::ProfileNotFound.into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = BillingError::Render(RenderError::TooManyItems(99)).into();
        assert!(matches!(err, ApiError::Rendering(_)));

        let err: ApiError = BillingError::Database(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    // Note: generate_for_job requires a database connection and is covered
    // by DB-backed integration tests (idempotent materialization included).
}
