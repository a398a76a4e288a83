//! HTTP mapping for the shared error taxonomy

use crate::importer::UNAVAILABLE_MESSAGE;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use encore_common::Error;
use serde_json::json;
use tracing::error;

/// Wrapper giving `encore_common::Error` an HTTP response mapping
#[derive(Debug)]
pub struct WebError(pub Error);

impl From<Error> for WebError {
    fn from(err: Error) -> Self {
        WebError(err)
    }
}

impl From<sqlx::Error> for WebError {
    fn from(err: sqlx::Error) -> Self {
        WebError(Error::Database(err))
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self.0 {
            Error::NotFound(what) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "not found", "detail": what })),
            )
                .into_response(),

            // Redirect to login, preserving the original destination
            Error::Unauthenticated { next } => {
                let location = format!("/accounts/login?next={}", next);
                (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
            }

            Error::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "forbidden" })),
            )
                .into_response(),

            Error::BadRequest(detail) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "bad request", "detail": detail })),
            )
                .into_response(),

            Error::Validation(field_errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": "validation failed", "field_errors": field_errors })),
            )
                .into_response(),

            Error::Upstream(cause) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("{}{}", UNAVAILABLE_MESSAGE, cause) })),
            )
                .into_response(),

            // Internal failures: log the detail, never leak it
            other => {
                error!("Internal error handling request: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
