//! Domain layer for the Tradeflow backend.
//!
//! This crate contains:
//! - Domain models (Job, Invoice, Profile, Notification)
//! - The billing core: line-item normalization and total computation
//! - Domain error types

pub mod models;
