//! Admin dashboard route.

use axum::{extract::State, Json};

use domain::models::DashboardResponse;
use persistence::repositories::DashboardRepository;

use crate::app::AppState;
use crate::error::ApiError;

/// Aggregate counts for the admin dashboard.
///
/// GET /api/v1/admin/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let dashboard_repo = DashboardRepository::new(state.pool.clone());

    let jobs = dashboard_repo.job_counts().await?;
    let invoices = dashboard_repo.invoice_totals().await?;

    Ok(Json(DashboardResponse { jobs, invoices }))
}
