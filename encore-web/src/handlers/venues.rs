//! Venue list, search, detail, and the shows played at a venue

use super::ListParams;
use crate::error::WebError;
use crate::response::envelope;
use crate::server::AppContext;
use axum::extract::{Path, Query, State};
use axum::Json;
use encore_common::db::{shows, venues};
use encore_common::pagination::{paginate, DEFAULT_PAGE_SIZE};
use serde_json::{json, Value};

/// GET /venues - list all venues, optionally filtered by search_name,
/// paginated ten per page
pub async fn venue_list(
    State(ctx): State<AppContext>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, WebError> {
    let found = venues::list_venues(&ctx.db, params.search_name.as_deref()).await?;
    let page = paginate(found, DEFAULT_PAGE_SIZE, params.page.as_deref());

    Ok(envelope(json!({
        "venues": page.items,
        "page": page.page,
        "num_pages": page.num_pages,
        "total": page.total,
        "search_term": params.search_name,
    })))
}

/// GET /venues/:id - venue detail
pub async fn venue_detail(
    State(ctx): State<AppContext>,
    Path(venue_id): Path<i64>,
) -> Result<Json<Value>, WebError> {
    let venue = venues::get_venue(&ctx.db, venue_id).await?;
    Ok(envelope(json!({ "venue": venue })))
}

/// GET /venues/:id/shows - every show played at this venue, most recent
/// first (the "artists at venue" page)
pub async fn shows_at_venue(
    State(ctx): State<AppContext>,
    Path(venue_id): Path<i64>,
) -> Result<Json<Value>, WebError> {
    let venue = venues::get_venue(&ctx.db, venue_id).await?;
    let shows = shows::shows_at_venue(&ctx.db, venue_id).await?;
    Ok(envelope(json!({ "venue": venue, "shows": shows })))
}
