//! Profile routes for managing one's own identity record.

use axum::{extract::State, Json};
use tracing::info;
use validator::Validate;

use domain::models::{ProfileResponse, UpdateProfileRequest};
use persistence::repositories::{ProfileRepository, ProfileUpdateInput};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Get the caller's profile.
///
/// GET /api/v1/profile
///
/// Self-provisions the profile row on first authenticated access, using
/// the role carried by the token.
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile_repo = ProfileRepository::new(state.pool.clone());

    let profile = profile_repo
        .ensure_profile(auth.user_id, &auth.role.to_string())
        .await?
        .into_domain();

    Ok(Json(profile.into()))
}

/// Update the caller's profile.
///
/// PUT /api/v1/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    request.validate()?;

    let profile_repo = ProfileRepository::new(state.pool.clone());

    // Make sure the row exists before patching it.
    profile_repo
        .ensure_profile(auth.user_id, &auth.role.to_string())
        .await?;

    let profile = profile_repo
        .update_profile(
            auth.user_id,
            ProfileUpdateInput {
                company_name: request.company_name,
                contact_person: request.contact_person,
                phone_number: request.phone_number,
                address: request.address,
            },
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?
        .into_domain();

    info!(profile_id = %auth.user_id, "Profile updated");

    Ok(Json(profile.into()))
}
