//! Repository implementations.
//!
//! Repositories own the SQL for one aggregate each and return entities;
//! conversion to domain models happens at the call site.

pub mod billing_settings;
pub mod dashboard;
pub mod invoice;
pub mod job;
pub mod notification;
pub mod profile;

pub use billing_settings::BillingSettingsRepository;
pub use dashboard::DashboardRepository;
pub use invoice::InvoiceRepository;
pub use job::{JobInput, JobQuery, JobRepository, JobScope, JobUpdateInput};
pub use notification::NotificationRepository;
pub use profile::{ProfileRepository, ProfileUpdateInput};
