//! Artist queries

use crate::db::models::Artist;
use crate::{Error, Result};
use sqlx::SqlitePool;

/// List artists ascending by name, optionally filtered to names containing
/// `search` as a case-insensitive substring. No match is an empty list.
pub async fn list_artists(pool: &SqlitePool, search: Option<&str>) -> Result<Vec<Artist>> {
    let artists = match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(term) => {
            sqlx::query_as::<_, Artist>(
                "SELECT id, name FROM artists \
                 WHERE instr(lower(name), lower(?)) > 0 \
                 ORDER BY name",
            )
            .bind(term)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Artist>("SELECT id, name FROM artists ORDER BY name")
                .fetch_all(pool)
                .await?
        }
    };
    Ok(artists)
}

/// Fetch one artist by id
pub async fn get_artist(pool: &SqlitePool, artist_id: i64) -> Result<Artist> {
    sqlx::query_as::<_, Artist>("SELECT id, name FROM artists WHERE id = ?")
        .bind(artist_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("artist {}", artist_id)))
}

/// Look up an artist by exact name (the importer's natural key)
pub async fn find_artist_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Artist>> {
    let artist = sqlx::query_as::<_, Artist>("SELECT id, name FROM artists WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(artist)
}

/// Create an artist unless one with the same name already exists.
/// Returns the id either way.
pub async fn upsert_artist_by_name(pool: &SqlitePool, name: &str) -> Result<i64> {
    if let Some(existing) = find_artist_by_name(pool, name).await? {
        return Ok(existing.id);
    }
    let result = sqlx::query("INSERT INTO artists (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}
