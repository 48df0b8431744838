//! Invoice routes for subcontractors.

use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use tracing::info;
use uuid::Uuid;

use domain::models::{InvoiceResponse, ListInvoicesResponse};
use persistence::repositories::{InvoiceRepository, JobScope};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::InvoiceGenerator;

/// List the caller's invoices, newest first.
///
/// GET /api/v1/invoices
pub async fn list_invoices(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ListInvoicesResponse>, ApiError> {
    let invoice_repo = InvoiceRepository::new(state.pool.clone());

    let invoices = invoice_repo.list_invoices(Some(auth.user_id)).await?;

    Ok(Json(ListInvoicesResponse {
        data: invoices
            .into_iter()
            .map(|e| InvoiceResponse::from(e.into_domain()))
            .collect(),
    }))
}

/// Download the invoice PDF for one of the caller's jobs.
///
/// GET /api/v1/jobs/:job_id/invoice
///
/// Materializes the invoice row on first request; later requests reuse it
/// and only re-render the document.
pub async fn download_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let generator = InvoiceGenerator::new(state.pool.clone());

    let generated = generator
        .generate_for_job(job_id, JobScope::Owned(auth.user_id))
        .await?;

    info!(
        job_id = %job_id,
        invoice_id = %generated.invoice.id,
        subcontractor_id = %auth.user_id,
        was_created = generated.was_created,
        "Invoice document served"
    );

    Ok(generated.into_pdf_response())
}
