//! Reconciling catalog payloads into the entity store
//!
//! Artists and venues are upserted by exact name; a show is created only
//! when both its artist and venue are already present. Skips never fail a
//! batch, and rows written before a later failure stay written.

use super::payload::{EventsPayload, VenuesPayload};
use encore_common::db::{artists, shows, venues};
use encore_common::Result;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::warn;

/// Outcome of one import batch
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Upsert every distinct artist named in an events payload
pub async fn import_artists(pool: &SqlitePool, payload: &EventsPayload) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();
    for name in payload.artist_names() {
        artists::upsert_artist_by_name(pool, &name).await?;
        summary.imported += 1;
    }
    Ok(summary)
}

/// Upsert every named venue in a venues payload
pub async fn import_venues(pool: &SqlitePool, payload: &VenuesPayload) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();
    for candidate in payload.venue_candidates() {
        venues::upsert_venue_by_name(pool, &candidate.name, &candidate.city, &candidate.state)
            .await?;
        summary.imported += 1;
    }
    Ok(summary)
}

/// Create a show per event whose artist and venue already exist in the
/// store; anything unresolvable is skipped and logged
pub async fn import_shows(pool: &SqlitePool, payload: &EventsPayload) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    for candidate in payload.show_candidates() {
        let Some(starts_at) = candidate.starts_at() else {
            warn!(
                "Unparseable start time {:?} for show by '{}', skipping",
                candidate.starts_at_raw, candidate.artist_name
            );
            summary.skipped += 1;
            continue;
        };

        let Some(artist) = artists::find_artist_by_name(pool, &candidate.artist_name).await? else {
            warn!(
                "Artist '{}' does not exist in the database, skipping show",
                candidate.artist_name
            );
            summary.skipped += 1;
            continue;
        };

        let Some(venue) = venues::find_venue_by_name(pool, &candidate.venue_name).await? else {
            warn!(
                "Venue '{}' does not exist in the database, skipping show",
                candidate.venue_name
            );
            summary.skipped += 1;
            continue;
        };

        shows::create_show(pool, artist.id, venue.id, starts_at).await?;
        summary.imported += 1;
    }

    Ok(summary)
}
