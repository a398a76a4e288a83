//! # Encore Web Service
//!
//! JSON-over-HTTP service for the Encore live-music notes site:
//! - Artist/venue browsing with search and pagination
//! - Note feeds and the top-shows ranking
//! - Session-based identity with ownership checks on mutations
//! - External catalog importer

pub mod error;
pub mod handlers;
pub mod importer;
pub mod policy;
pub mod response;
pub mod server;
pub mod session;

pub use error::WebError;
pub use server::{build_router, AppContext};
