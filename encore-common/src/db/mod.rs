//! Database layer: schema initialization and per-entity query modules

pub mod artists;
pub mod init;
pub mod models;
pub mod notes;
pub mod sessions;
pub mod shows;
pub mod users;
pub mod venues;

pub use init::{create_schema, init_database};
