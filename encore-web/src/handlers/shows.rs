//! The top-shows ranking

use crate::error::WebError;
use crate::response::envelope;
use crate::server::AppContext;
use axum::extract::State;
use axum::Json;
use encore_common::db::shows;
use serde_json::{json, Value};

/// GET /shows/top - shows with the most notes: only shows with at least
/// one note, most recent show date first, then note count
pub async fn top_shows(State(ctx): State<AppContext>) -> Result<Json<Value>, WebError> {
    let top = shows::top_shows(&ctx.db, shows::TOP_SHOWS_LIMIT).await?;
    Ok(envelope(json!({ "top_shows": top })))
}
