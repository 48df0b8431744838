//! Notification entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Notification, NotificationKind};

/// Database row mapping for the notifications table.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationEntity {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub kind: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl NotificationEntity {
    /// Convert to domain model. Unknown kinds fall back to job status changes.
    pub fn into_domain(self) -> Notification {
        let kind = self
            .kind
            .parse::<NotificationKind>()
            .unwrap_or(NotificationKind::JobStatusChanged);

        Notification {
            id: self.id,
            profile_id: self.profile_id,
            kind,
            body: self.body,
            read: self.is_read,
            created_at: self.created_at,
        }
    }
}

impl From<NotificationEntity> for Notification {
    fn from(entity: NotificationEntity) -> Self {
        entity.into_domain()
    }
}
