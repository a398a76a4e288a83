//! HTTP request handlers

pub mod accounts;
pub mod artists;
pub mod import;
pub mod notes;
pub mod shows;
pub mod users;
pub mod venues;

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: "encore-web".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Query parameters shared by the artist and venue list pages
#[derive(Debug, serde::Deserialize)]
pub struct ListParams {
    pub search_name: Option<String>,
    pub page: Option<String>,
}
