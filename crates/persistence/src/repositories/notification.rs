//! Notification repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::NotificationEntity;
use crate::metrics::QueryTimer;

/// Repository for notification database operations.
#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Creates a new NotificationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a notification for a profile.
    pub async fn create_notification(
        &self,
        profile_id: Uuid,
        kind: &str,
        body: &str,
    ) -> Result<NotificationEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_notification");
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            INSERT INTO notifications (profile_id, kind, body)
            VALUES ($1, $2, $3)
            RETURNING id, profile_id, kind, body, is_read, created_at
            "#,
        )
        .bind(profile_id)
        .bind(kind)
        .bind(body)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List notifications for a profile, newest first.
    pub async fn list_notifications(
        &self,
        profile_id: Uuid,
        unread_only: bool,
    ) -> Result<Vec<NotificationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_notifications");
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            SELECT id, profile_id, kind, body, is_read, created_at
            FROM notifications
            WHERE profile_id = $1 AND (NOT $2 OR is_read = FALSE)
            ORDER BY created_at DESC
            "#,
        )
        .bind(profile_id)
        .bind(unread_only)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Mark one of the profile's notifications as read.
    ///
    /// Returns the number of rows updated (0 when missing or not owned).
    pub async fn mark_read(&self, id: Uuid, profile_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("mark_notification_read");
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE id = $1 AND profile_id = $2
            "#,
        )
        .bind(id)
        .bind(profile_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
