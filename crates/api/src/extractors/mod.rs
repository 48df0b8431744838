//! Request extractors.

pub mod auth_user;
