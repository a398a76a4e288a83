//! Catalog import trigger routes
//!
//! Each route fetches one resource kind from the external catalog and
//! reconciles it into the store. Upstream failures surface as 500 with
//! the underlying cause; they never affect any other route.

use crate::error::WebError;
use crate::importer::reconcile;
use crate::response::envelope_with;
use crate::server::AppContext;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

/// GET /admin/import/artists - populate artists from the catalog
pub async fn import_artists(State(ctx): State<AppContext>) -> Result<Json<Value>, WebError> {
    let payload = ctx.catalog.fetch_events().await?;
    let summary = reconcile::import_artists(&ctx.db, &payload).await?;
    info!("Imported {} artists from catalog", summary.imported);
    Ok(envelope_with(
        json!({ "summary": summary }),
        &["Artists have been populated correctly."],
    ))
}

/// GET /admin/import/venues - populate venues from the catalog
pub async fn import_venues(State(ctx): State<AppContext>) -> Result<Json<Value>, WebError> {
    let payload = ctx.catalog.fetch_venues().await?;
    let summary = reconcile::import_venues(&ctx.db, &payload).await?;
    info!("Imported {} venues from catalog", summary.imported);
    Ok(envelope_with(
        json!({ "summary": summary }),
        &["Venues have been populated correctly."],
    ))
}

/// GET /admin/import/shows - populate shows from the catalog. Events whose
/// artist or venue is not yet stored are skipped, never fatal.
pub async fn import_shows(State(ctx): State<AppContext>) -> Result<Json<Value>, WebError> {
    let payload = ctx.catalog.fetch_events().await?;
    let summary = reconcile::import_shows(&ctx.db, &payload).await?;
    info!(
        "Imported {} shows from catalog ({} skipped)",
        summary.imported, summary.skipped
    );
    Ok(envelope_with(
        json!({ "summary": summary }),
        &["Shows have been populated correctly."],
    ))
}
