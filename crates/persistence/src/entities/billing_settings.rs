//! Billing settings entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::BillingSettings;

/// Database row mapping for the single-row billing_settings table.
#[derive(Debug, Clone, FromRow)]
pub struct BillingSettingsEntity {
    pub recipient_text: String,
    pub updated_at: DateTime<Utc>,
}

impl BillingSettingsEntity {
    pub fn into_domain(self) -> BillingSettings {
        BillingSettings {
            recipient_text: self.recipient_text,
        }
    }
}

impl From<BillingSettingsEntity> for BillingSettings {
    fn from(entity: BillingSettingsEntity) -> Self {
        entity.into_domain()
    }
}
