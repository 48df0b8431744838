//! Notification domain model.
//!
//! Notifications are persisted rows served over the API; delivery to an
//! external channel (email, push) is outside this service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    JobStatusChanged,
    InvoiceStatusChanged,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::JobStatusChanged => write!(f, "job_status_changed"),
            NotificationKind::InvoiceStatusChanged => write!(f, "invoice_status_changed"),
        }
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "job_status_changed" => Ok(NotificationKind::JobStatusChanged),
            "invoice_status_changed" => Ok(NotificationKind::InvoiceStatusChanged),
            other => Err(format!("Unknown notification kind: {}", other)),
        }
    }
}

/// An in-app message for a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Notification {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub kind: NotificationKind,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification representation returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct NotificationResponse {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            kind: notification.kind,
            body: notification.body,
            read: notification.read,
            created_at: notification.created_at,
        }
    }
}

/// Response for notification listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListNotificationsResponse {
    pub data: Vec<NotificationResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display_roundtrip() {
        for kind in [
            NotificationKind::JobStatusChanged,
            NotificationKind::InvoiceStatusChanged,
        ] {
            let parsed: NotificationKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_kind_from_str_rejects_unknown() {
        assert!("job_created".parse::<NotificationKind>().is_err());
    }

    #[test]
    fn test_notification_response_omits_profile_id() {
        let notification = Notification {
            id: Uuid::new_v4(),
            profile_id: Uuid::new_v4(),
            kind: NotificationKind::JobStatusChanged,
            body: "Job marked in progress".to_string(),
            read: false,
            created_at: Utc::now(),
        };
        let response = NotificationResponse::from(notification);
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("profile_id"));
        assert!(json.contains("job_status_changed"));
    }
}
