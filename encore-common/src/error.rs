//! Common error types for Encore

use crate::validate::FieldError;
use thiserror::Error;

/// Common result type for Encore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the query layer, the importer and the web handlers
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Referenced artist/venue/show/note/user does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Mutating action attempted with no identity; `next` is the original
    /// destination to return to after login
    #[error("Authentication required")]
    Unauthenticated { next: String },

    /// Authenticated identity attempted an action it does not own
    #[error("Forbidden")]
    Forbidden,

    /// Domain rule violation that is not an authorization issue
    /// (e.g. a note for a show that has not happened yet)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Submitted form data failed field constraints; no mutation occurred
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// External catalog fetch/parse/credential failure
    #[error("Upstream service error: {0}")]
    Upstream(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
