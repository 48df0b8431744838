//! Billing settings routes (admin only).

use axum::{extract::State, Json};
use tracing::info;
use validator::Validate;

use domain::models::{BillingSettings, UpdateBillingSettingsRequest};
use persistence::repositories::BillingSettingsRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Get the billing settings.
///
/// GET /api/v1/admin/settings/billing
///
/// Falls back to the built-in recipient text when nothing has been
/// configured yet.
pub async fn get_billing_settings(
    State(state): State<AppState>,
) -> Result<Json<BillingSettings>, ApiError> {
    let settings_repo = BillingSettingsRepository::new(state.pool.clone());

    let settings = settings_repo
        .find()
        .await?
        .map(|e| e.into_domain())
        .unwrap_or_default();

    Ok(Json(settings))
}

/// Update the billing settings.
///
/// PUT /api/v1/admin/settings/billing
pub async fn update_billing_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<UpdateBillingSettingsRequest>,
) -> Result<Json<BillingSettings>, ApiError> {
    request.validate()?;

    let settings_repo = BillingSettingsRepository::new(state.pool.clone());

    let settings = settings_repo
        .set_recipient_text(&request.recipient_text)
        .await?
        .into_domain();

    info!(admin_id = %auth.user_id, "Billing settings updated");

    Ok(Json(settings))
}
