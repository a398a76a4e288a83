//! Artist list, search, detail, and the shows an artist has played

use super::ListParams;
use crate::error::WebError;
use crate::response::envelope;
use crate::server::AppContext;
use axum::extract::{Path, Query, State};
use axum::Json;
use encore_common::db::{artists, shows};
use encore_common::pagination::{paginate, DEFAULT_PAGE_SIZE};
use serde_json::{json, Value};

/// GET /artists - list all artists, optionally filtered by search_name,
/// paginated ten per page
pub async fn artist_list(
    State(ctx): State<AppContext>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, WebError> {
    let found = artists::list_artists(&ctx.db, params.search_name.as_deref()).await?;
    let page = paginate(found, DEFAULT_PAGE_SIZE, params.page.as_deref());

    Ok(envelope(json!({
        "artists": page.items,
        "page": page.page,
        "num_pages": page.num_pages,
        "total": page.total,
        "search_term": params.search_name,
    })))
}

/// GET /artists/:id - artist detail
pub async fn artist_detail(
    State(ctx): State<AppContext>,
    Path(artist_id): Path<i64>,
) -> Result<Json<Value>, WebError> {
    let artist = artists::get_artist(&ctx.db, artist_id).await?;
    Ok(envelope(json!({ "artist": artist })))
}

/// GET /artists/:id/shows - every show this artist has played, most
/// recent first
pub async fn shows_for_artist(
    State(ctx): State<AppContext>,
    Path(artist_id): Path<i64>,
) -> Result<Json<Value>, WebError> {
    let artist = artists::get_artist(&ctx.db, artist_id).await?;
    let shows = shows::shows_for_artist(&ctx.db, artist_id).await?;
    Ok(envelope(json!({ "artist": artist, "shows": shows })))
}
