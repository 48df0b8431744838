//! Domain model definitions.

pub mod dashboard;
pub mod invoice;
pub mod job;
pub mod line_item;
pub mod notification;
pub mod profile;
pub mod settings;

pub use dashboard::{DashboardResponse, InvoiceTotals, JobCounts};
pub use invoice::{
    Invoice, InvoiceResponse, InvoiceStatus, ListInvoicesResponse, UpdateInvoiceStatusRequest,
};
pub use job::{
    CreateJobRequest, Job, JobResponse, JobStatus, ListJobsResponse, UpdateJobRequest,
    UpdateJobStatusRequest,
};
pub use line_item::{calculate_total, normalize_line_items, LineItem};
pub use notification::{
    ListNotificationsResponse, Notification, NotificationKind, NotificationResponse,
};
pub use profile::{Profile, ProfileResponse, Role, UpdateProfileRequest};
pub use settings::{BillingSettings, UpdateBillingSettingsRequest, DEFAULT_RECIPIENT_TEXT};
