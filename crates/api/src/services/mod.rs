//! Application services.

pub mod billing;
pub mod invoice_pdf;

pub use billing::{BillingError, GeneratedInvoice, InvoiceGenerator};
