//! # Unitops Shared Library
//!
//! This crate contains shared types, utilities, and business logic used by
//! the unitops API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `auth`: Authentication, token handling, and the access policy
//! - `db`: Connection pool and migrations
//! - `ordering`: The order placement engine
//! - `reports`: Read-side financial aggregations

pub mod auth;
pub mod db;
pub mod models;
pub mod ordering;
pub mod reports;

/// Current version of the unitops shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
