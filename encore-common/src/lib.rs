//! # Encore Common Library
//!
//! Shared code for the Encore live-music notes service:
//! - Database models and queries
//! - Error types
//! - Pagination
//! - Form validation
//! - Password and session credential helpers
//! - Clock abstraction

pub mod auth;
pub mod db;
pub mod error;
pub mod pagination;
pub mod time;
pub mod validate;

pub use error::{Error, Result};
pub use time::Clock;
