//! Job domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use shared::validation::validate_plain_text;

/// Lifecycle state of a job.
///
/// Subcontractors create jobs as `pending`; administrators move them
/// forward. Only pending jobs may be edited or deleted by their owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    InProgress,
    Completed,
}

impl JobStatus {
    /// Whether the owning subcontractor may still modify or delete the job.
    pub fn is_editable(&self) -> bool {
        matches!(self, JobStatus::Pending)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::InProgress => write!(f, "in_progress"),
            JobStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "in_progress" => Ok(JobStatus::InProgress),
            "completed" => Ok(JobStatus::Completed),
            other => Err(format!("Unknown job status: {}", other)),
        }
    }
}

/// A unit of work submitted by a subcontractor.
///
/// `line_items` is kept as the raw JSON payload; consumers normalize it
/// through the billing core before doing arithmetic on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Job {
    pub id: Uuid,
    pub subcontractor_id: Uuid,
    pub job_type: String,
    pub location: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: JobStatus,
    pub notes: Option<String>,
    pub line_items: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a job.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateJobRequest {
    #[validate(length(min = 1, max = 120, message = "Job type must be 1-120 characters"))]
    #[validate(custom(function = "validate_plain_text"))]
    pub job_type: String,

    #[validate(length(min = 1, max = 200, message = "Location must be 1-200 characters"))]
    #[validate(custom(function = "validate_plain_text"))]
    pub location: String,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    #[validate(length(max = 2000, message = "Notes must not exceed 2000 characters"))]
    #[validate(custom(function = "validate_plain_text"))]
    pub notes: Option<String>,

    /// Loosely-typed line items; absent, single object, or array.
    pub line_items: Option<Value>,
}

/// Request payload for updating a pending job. All fields optional.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateJobRequest {
    #[validate(length(min = 1, max = 120, message = "Job type must be 1-120 characters"))]
    #[validate(custom(function = "validate_plain_text"))]
    pub job_type: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Location must be 1-200 characters"))]
    #[validate(custom(function = "validate_plain_text"))]
    pub location: Option<String>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    #[validate(length(max = 2000, message = "Notes must not exceed 2000 characters"))]
    #[validate(custom(function = "validate_plain_text"))]
    pub notes: Option<String>,

    pub line_items: Option<Value>,
}

/// Request payload for an admin-driven status change.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdateJobStatusRequest {
    pub status: JobStatus,
}

/// Job representation returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct JobResponse {
    pub id: Uuid,
    pub subcontractor_id: Uuid,
    pub job_type: String,
    pub location: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: JobStatus,
    pub notes: Option<String>,
    pub line_items: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            subcontractor_id: job.subcontractor_id,
            job_type: job.job_type,
            location: job.location,
            start_date: job.start_date,
            end_date: job.end_date,
            status: job.status,
            notes: job.notes,
            line_items: job.line_items,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

/// Response for job listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListJobsResponse {
    pub data: Vec<JobResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_status_display_roundtrip() {
        for status in [JobStatus::Pending, JobStatus::InProgress, JobStatus::Completed] {
            let parsed: JobStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_job_status_from_str_rejects_unknown() {
        assert!("approved".parse::<JobStatus>().is_err());
        assert!("".parse::<JobStatus>().is_err());
    }

    #[test]
    fn test_job_status_editability() {
        assert!(JobStatus::Pending.is_editable());
        assert!(!JobStatus::InProgress.is_editable());
        assert!(!JobStatus::Completed.is_editable());
    }

    #[test]
    fn test_job_status_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&JobStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        let status: JobStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, JobStatus::Completed);
    }

    #[test]
    fn test_create_job_request_validation() {
        let valid = CreateJobRequest {
            job_type: "Tiling".to_string(),
            location: "Basel".to_string(),
            start_date: None,
            end_date: None,
            notes: Some("second floor".to_string()),
            line_items: Some(json!([{"description": "Tiling", "quantity": 10, "unit_price": 15}])),
        };
        assert!(valid.validate().is_ok());

        let empty_type = CreateJobRequest {
            job_type: "".to_string(),
            location: "Basel".to_string(),
            start_date: None,
            end_date: None,
            notes: None,
            line_items: None,
        };
        assert!(empty_type.validate().is_err());

        let long_notes = CreateJobRequest {
            job_type: "Tiling".to_string(),
            location: "Basel".to_string(),
            start_date: None,
            end_date: None,
            notes: Some("x".repeat(2001)),
            line_items: None,
        };
        assert!(long_notes.validate().is_err());
    }

    #[test]
    fn test_update_job_request_all_optional() {
        let empty: UpdateJobRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.validate().is_ok());
        assert!(empty.job_type.is_none());
        assert!(empty.line_items.is_none());
    }

    #[test]
    fn test_job_response_from_job() {
        let job = Job {
            id: Uuid::new_v4(),
            subcontractor_id: Uuid::new_v4(),
            job_type: "Plastering".to_string(),
            location: "Zurich".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 4, 1),
            end_date: None,
            status: JobStatus::Pending,
            notes: None,
            line_items: json!([]),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let response = JobResponse::from(job.clone());
        assert_eq!(response.id, job.id);
        assert_eq!(response.status, JobStatus::Pending);
        assert_eq!(response.line_items, json!([]));
    }
}
