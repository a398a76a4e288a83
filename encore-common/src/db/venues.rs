//! Venue queries

use crate::db::models::Venue;
use crate::{Error, Result};
use sqlx::SqlitePool;

/// List venues ascending by name, optionally filtered to names containing
/// `search` as a case-insensitive substring.
pub async fn list_venues(pool: &SqlitePool, search: Option<&str>) -> Result<Vec<Venue>> {
    let venues = match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(term) => {
            sqlx::query_as::<_, Venue>(
                "SELECT id, name, city, state FROM venues \
                 WHERE instr(lower(name), lower(?)) > 0 \
                 ORDER BY name",
            )
            .bind(term)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Venue>("SELECT id, name, city, state FROM venues ORDER BY name")
                .fetch_all(pool)
                .await?
        }
    };
    Ok(venues)
}

/// Fetch one venue by id
pub async fn get_venue(pool: &SqlitePool, venue_id: i64) -> Result<Venue> {
    sqlx::query_as::<_, Venue>("SELECT id, name, city, state FROM venues WHERE id = ?")
        .bind(venue_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("venue {}", venue_id)))
}

/// Look up a venue by exact name (the importer's natural key)
pub async fn find_venue_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Venue>> {
    let venue =
        sqlx::query_as::<_, Venue>("SELECT id, name, city, state FROM venues WHERE name = ?")
            .bind(name)
            .fetch_optional(pool)
            .await?;
    Ok(venue)
}

/// Create a venue unless one with the same name already exists.
/// Returns the id either way.
pub async fn upsert_venue_by_name(
    pool: &SqlitePool,
    name: &str,
    city: &str,
    state: &str,
) -> Result<i64> {
    if let Some(existing) = find_venue_by_name(pool, name).await? {
        return Ok(existing.id);
    }
    let result = sqlx::query("INSERT INTO venues (name, city, state) VALUES (?, ?, ?)")
        .bind(name)
        .bind(city)
        .bind(state)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}
