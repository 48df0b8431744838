//! Invoice routes for administrators.

use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use tracing::{info, warn};
use uuid::Uuid;

use domain::models::{
    InvoiceResponse, ListInvoicesResponse, NotificationKind, UpdateInvoiceStatusRequest,
};
use persistence::repositories::{InvoiceRepository, JobScope, NotificationRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::InvoiceGenerator;

/// List all invoices, newest first.
///
/// GET /api/v1/admin/invoices
pub async fn list_invoices(
    State(state): State<AppState>,
) -> Result<Json<ListInvoicesResponse>, ApiError> {
    let invoice_repo = InvoiceRepository::new(state.pool.clone());

    let invoices = invoice_repo.list_invoices(None).await?;

    Ok(Json(ListInvoicesResponse {
        data: invoices
            .into_iter()
            .map(|e| InvoiceResponse::from(e.into_domain()))
            .collect(),
    }))
}

/// Set an invoice's status.
///
/// PUT /api/v1/admin/invoices/:invoice_id/status
///
/// All transitions are permitted, including reversals. The owning
/// subcontractor receives a notification; a failed notification write is
/// logged but does not fail the status change.
pub async fn set_invoice_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(invoice_id): Path<Uuid>,
    Json(request): Json<UpdateInvoiceStatusRequest>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let invoice_repo = InvoiceRepository::new(state.pool.clone());
    let notification_repo = NotificationRepository::new(state.pool.clone());

    let invoice = invoice_repo
        .set_status(invoice_id, &request.status.to_string())
        .await?
        .ok_or_else(|| ApiError::NotFound("Invoice not found".to_string()))?
        .into_domain();

    info!(
        invoice_id = %invoice.id,
        job_id = %invoice.job_id,
        status = %invoice.status,
        admin_id = %auth.user_id,
        "Invoice status changed"
    );

    let body = format!(
        "Invoice for job {} is now {}",
        invoice.job_id, invoice.status
    );
    if let Err(e) = notification_repo
        .create_notification(
            invoice.subcontractor_id,
            &NotificationKind::InvoiceStatusChanged.to_string(),
            &body,
        )
        .await
    {
        warn!(invoice_id = %invoice.id, error = %e, "Failed to write invoice status notification");
    }

    Ok(Json(invoice.into()))
}

/// Download the invoice PDF for any job.
///
/// GET /api/v1/admin/jobs/:job_id/invoice
pub async fn download_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let generator = InvoiceGenerator::new(state.pool.clone());

    let generated = generator.generate_for_job(job_id, JobScope::Any).await?;

    info!(
        job_id = %job_id,
        invoice_id = %generated.invoice.id,
        admin_id = %auth.user_id,
        was_created = generated.was_created,
        "Invoice document served"
    );

    Ok(generated.into_pdf_response())
}
