//! Billing settings.

use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::validation::validate_plain_text;

/// Recipient boilerplate used when no explicit text has been configured.
pub const DEFAULT_RECIPIENT_TEXT: &str = "To Whom It May Concern,";

/// Instance-wide billing settings (single row).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BillingSettings {
    /// Salutation printed at the top of every invoice document.
    pub recipient_text: String,
}

impl Default for BillingSettings {
    fn default() -> Self {
        Self {
            recipient_text: DEFAULT_RECIPIENT_TEXT.to_string(),
        }
    }
}

/// Request payload for updating billing settings.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateBillingSettingsRequest {
    #[validate(length(min = 1, max = 500, message = "Recipient text must be 1-500 characters"))]
    #[validate(custom(function = "validate_plain_text"))]
    pub recipient_text: String,
}
