//! Notification routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use domain::models::{ListNotificationsResponse, NotificationResponse};
use persistence::repositories::NotificationRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Query parameters for notification listings.
#[derive(Debug, Deserialize)]
pub struct ListNotificationsParams {
    #[serde(default)]
    pub unread: bool,
}

/// List the caller's notifications, newest first.
///
/// GET /api/v1/notifications
/// GET /api/v1/notifications?unread=true
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListNotificationsParams>,
) -> Result<Json<ListNotificationsResponse>, ApiError> {
    let notification_repo = NotificationRepository::new(state.pool.clone());

    let notifications = notification_repo
        .list_notifications(auth.user_id, params.unread)
        .await?;

    Ok(Json(ListNotificationsResponse {
        data: notifications
            .into_iter()
            .map(|e| NotificationResponse::from(e.into_domain()))
            .collect(),
    }))
}

/// Mark one of the caller's notifications as read.
///
/// POST /api/v1/notifications/:notification_id/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notification_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let notification_repo = NotificationRepository::new(state.pool.clone());

    let rows_affected = notification_repo
        .mark_read(notification_id, auth.user_id)
        .await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Notification not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
