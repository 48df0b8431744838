//! Shared utilities and common types for the Tradeflow backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT verification for tokens issued by the external identity provider
//! - Cursor-based pagination
//! - Common validation logic

pub mod jwt;
pub mod pagination;
pub mod validation;
