//! Billing settings repository for database operations.

use sqlx::PgPool;

use crate::entities::BillingSettingsEntity;
use crate::metrics::QueryTimer;

use domain::models::DEFAULT_RECIPIENT_TEXT;

/// Repository for the single-row billing settings table.
#[derive(Clone)]
pub struct BillingSettingsRepository {
    pool: PgPool,
}

impl BillingSettingsRepository {
    /// Creates a new BillingSettingsRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the recipient text, falling back to the default when the row
    /// has never been written.
    pub async fn recipient_text(&self) -> Result<String, sqlx::Error> {
        let timer = QueryTimer::new("get_recipient_text");
        let result = sqlx::query_scalar::<_, String>(
            r#"
            SELECT recipient_text FROM billing_settings WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.unwrap_or_else(|| DEFAULT_RECIPIENT_TEXT.to_string()))
    }

    /// Fetch the settings row, if present.
    pub async fn find(&self) -> Result<Option<BillingSettingsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_billing_settings");
        let result = sqlx::query_as::<_, BillingSettingsEntity>(
            r#"
            SELECT recipient_text, updated_at FROM billing_settings WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Upsert the recipient text.
    pub async fn set_recipient_text(
        &self,
        recipient_text: &str,
    ) -> Result<BillingSettingsEntity, sqlx::Error> {
        let timer = QueryTimer::new("set_recipient_text");
        let result = sqlx::query_as::<_, BillingSettingsEntity>(
            r#"
            INSERT INTO billing_settings (id, recipient_text)
            VALUES (1, $1)
            ON CONFLICT (id) DO UPDATE SET
                recipient_text = EXCLUDED.recipient_text,
                updated_at = NOW()
            RETURNING recipient_text, updated_at
            "#,
        )
        .bind(recipient_text)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
