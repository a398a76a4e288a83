//! Show queries and the "shows with most notes" ranking

use crate::db::models::{Show, ShowWithNames, TopShow};
use crate::time::format_timestamp;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Default size of the top-shows ranking
pub const TOP_SHOWS_LIMIT: i64 = 5;

const SHOW_WITH_NAMES: &str = "SELECT s.id, s.artist_id, a.name AS artist_name, \
     s.venue_id, v.name AS venue_name, s.show_date \
     FROM shows s \
     JOIN artists a ON a.id = s.artist_id \
     JOIN venues v ON v.id = s.venue_id";

/// Fetch one show by id
pub async fn get_show(pool: &SqlitePool, show_id: i64) -> Result<Show> {
    sqlx::query_as::<_, Show>(
        "SELECT id, artist_id, venue_id, show_date FROM shows WHERE id = ?",
    )
    .bind(show_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound(format!("show {}", show_id)))
}

/// Fetch one show with artist/venue names
pub async fn get_show_with_names(pool: &SqlitePool, show_id: i64) -> Result<ShowWithNames> {
    sqlx::query_as::<_, ShowWithNames>(&format!("{} WHERE s.id = ?", SHOW_WITH_NAMES))
        .bind(show_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("show {}", show_id)))
}

/// Shows for one artist, most recent first. Unknown artist is NotFound.
pub async fn shows_for_artist(pool: &SqlitePool, artist_id: i64) -> Result<Vec<ShowWithNames>> {
    // Resolve the artist first so an unknown id is a 404, not an empty list
    crate::db::artists::get_artist(pool, artist_id).await?;

    let shows = sqlx::query_as::<_, ShowWithNames>(&format!(
        "{} WHERE s.artist_id = ? ORDER BY s.show_date DESC",
        SHOW_WITH_NAMES
    ))
    .bind(artist_id)
    .fetch_all(pool)
    .await?;
    Ok(shows)
}

/// Shows at one venue, most recent first. Unknown venue is NotFound.
pub async fn shows_at_venue(pool: &SqlitePool, venue_id: i64) -> Result<Vec<ShowWithNames>> {
    crate::db::venues::get_venue(pool, venue_id).await?;

    let shows = sqlx::query_as::<_, ShowWithNames>(&format!(
        "{} WHERE s.venue_id = ? ORDER BY s.show_date DESC",
        SHOW_WITH_NAMES
    ))
    .bind(venue_id)
    .fetch_all(pool)
    .await?;
    Ok(shows)
}

/// Create a show. Caller has already resolved artist and venue ids.
pub async fn create_show(
    pool: &SqlitePool,
    artist_id: i64,
    venue_id: i64,
    show_date: DateTime<Utc>,
) -> Result<i64> {
    let result = sqlx::query("INSERT INTO shows (artist_id, venue_id, show_date) VALUES (?, ?, ?)")
        .bind(artist_id)
        .bind(venue_id)
        .bind(format_timestamp(show_date))
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Rank shows that have at least one note: most recent show date first,
/// then note count. Shows with zero notes never appear; fewer than `limit`
/// qualifying shows yields a shorter list.
pub async fn top_shows(pool: &SqlitePool, limit: i64) -> Result<Vec<TopShow>> {
    let shows = sqlx::query_as::<_, TopShow>(
        "SELECT s.id, s.artist_id, a.name AS artist_name, \
                s.venue_id, v.name AS venue_name, s.show_date, \
                COUNT(n.id) AS note_count, \
                (SELECT n2.id FROM notes n2 WHERE n2.show_id = s.id \
                 ORDER BY n2.posted_date DESC, n2.id DESC LIMIT 1) AS latest_note_id \
         FROM shows s \
         JOIN artists a ON a.id = s.artist_id \
         JOIN venues v ON v.id = s.venue_id \
         JOIN notes n ON n.show_id = s.id \
         GROUP BY s.id \
         ORDER BY s.show_date DESC, note_count DESC \
         LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(shows)
}
