//! Invoice entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Invoice, InvoiceStatus};

/// Database row mapping for the invoices table.
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceEntity {
    pub id: Uuid,
    pub job_id: Uuid,
    pub subcontractor_id: Uuid,
    pub invoice_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InvoiceEntity {
    /// Convert to domain model. Unknown status strings fall back to unpaid.
    pub fn into_domain(self) -> Invoice {
        let status = self
            .status
            .parse::<InvoiceStatus>()
            .unwrap_or(InvoiceStatus::Unpaid);

        Invoice {
            id: self.id,
            job_id: self.job_id,
            subcontractor_id: self.subcontractor_id,
            invoice_date: self.invoice_date,
            due_date: self.due_date,
            status,
            total_amount: self.total_amount,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<InvoiceEntity> for Invoice {
    fn from(entity: InvoiceEntity) -> Self {
        entity.into_domain()
    }
}
