//! Job entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Job, JobStatus};

/// Database row mapping for the jobs table.
///
/// `line_items` is the raw JSONB payload; a NULL column reads as `None`
/// and converts to JSON null in the domain model.
#[derive(Debug, Clone, FromRow)]
pub struct JobEntity {
    pub id: Uuid,
    pub subcontractor_id: Uuid,
    pub job_type: String,
    pub location: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub notes: Option<String>,
    pub line_items: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobEntity {
    /// Convert to domain model. Unknown status strings fall back to pending.
    pub fn into_domain(self) -> Job {
        let status = self.status.parse::<JobStatus>().unwrap_or(JobStatus::Pending);

        Job {
            id: self.id,
            subcontractor_id: self.subcontractor_id,
            job_type: self.job_type,
            location: self.location,
            start_date: self.start_date,
            end_date: self.end_date,
            status,
            notes: self.notes,
            line_items: self.line_items.unwrap_or(Value::Null),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<JobEntity> for Job {
    fn from(entity: JobEntity) -> Self {
        entity.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_entity() -> JobEntity {
        JobEntity {
            id: Uuid::new_v4(),
            subcontractor_id: Uuid::new_v4(),
            job_type: "Tiling".to_string(),
            location: "Basel".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 4, 1),
            end_date: None,
            status: "pending".to_string(),
            notes: None,
            line_items: Some(json!([{"description": "Tiling", "quantity": 10, "unit_price": 15}])),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_entity_to_domain() {
        let entity = create_test_entity();
        let job: Job = entity.clone().into();

        assert_eq!(job.id, entity.id);
        assert_eq!(job.subcontractor_id, entity.subcontractor_id);
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.line_items, entity.line_items.unwrap());
    }

    #[test]
    fn test_entity_null_line_items() {
        let mut entity = create_test_entity();
        entity.line_items = None;

        let job: Job = entity.into();
        assert_eq!(job.line_items, Value::Null);
    }

    #[test]
    fn test_entity_in_progress_status() {
        let mut entity = create_test_entity();
        entity.status = "in_progress".to_string();

        let job: Job = entity.into();
        assert_eq!(job.status, JobStatus::InProgress);
    }

    #[test]
    fn test_entity_unknown_status_defaults_to_pending() {
        let mut entity = create_test_entity();
        entity.status = "archived".to_string();

        let job: Job = entity.into();
        assert_eq!(job.status, JobStatus::Pending);
    }
}
