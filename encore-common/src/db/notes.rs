//! Note queries

use crate::db::models::{Note, NoteWithContext};
use crate::time::format_timestamp;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Default size of the latest-notes feed
pub const LATEST_NOTES_LIMIT: i64 = 20;

const NOTE_WITH_CONTEXT: &str = "SELECT n.id, n.show_id, n.user_id, u.username, \
     a.name AS artist_name, v.name AS venue_name, s.show_date, \
     n.title, n.text, n.posted_date \
     FROM notes n \
     JOIN users u ON u.id = n.user_id \
     JOIN shows s ON s.id = n.show_id \
     JOIN artists a ON a.id = s.artist_id \
     JOIN venues v ON v.id = s.venue_id";

/// The most recent notes across all shows, newest first
pub async fn latest_notes(pool: &SqlitePool, limit: i64) -> Result<Vec<NoteWithContext>> {
    let notes = sqlx::query_as::<_, NoteWithContext>(&format!(
        "{} ORDER BY n.posted_date DESC, n.id DESC LIMIT ?",
        NOTE_WITH_CONTEXT
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(notes)
}

/// Notes for one show, newest first. Unknown show is NotFound.
pub async fn notes_for_show(pool: &SqlitePool, show_id: i64) -> Result<Vec<NoteWithContext>> {
    crate::db::shows::get_show(pool, show_id).await?;

    let notes = sqlx::query_as::<_, NoteWithContext>(&format!(
        "{} WHERE n.show_id = ? ORDER BY n.posted_date DESC, n.id DESC",
        NOTE_WITH_CONTEXT
    ))
    .bind(show_id)
    .fetch_all(pool)
    .await?;
    Ok(notes)
}

/// Notes authored by one user, newest first
pub async fn notes_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<NoteWithContext>> {
    let notes = sqlx::query_as::<_, NoteWithContext>(&format!(
        "{} WHERE n.user_id = ? ORDER BY n.posted_date DESC, n.id DESC",
        NOTE_WITH_CONTEXT
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(notes)
}

/// Fetch one note by id
pub async fn get_note(pool: &SqlitePool, note_id: i64) -> Result<Note> {
    sqlx::query_as::<_, Note>(
        "SELECT id, show_id, user_id, title, text, posted_date FROM notes WHERE id = ?",
    )
    .bind(note_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound(format!("note {}", note_id)))
}

/// Count notes for one show
pub async fn note_count_for_show(pool: &SqlitePool, show_id: i64) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notes WHERE show_id = ?")
        .bind(show_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Create a note; posted_date is fixed at creation and never changes
pub async fn create_note(
    pool: &SqlitePool,
    show_id: i64,
    user_id: i64,
    title: &str,
    text: &str,
    posted_date: DateTime<Utc>,
) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO notes (show_id, user_id, title, text, posted_date) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(show_id)
    .bind(user_id)
    .bind(title)
    .bind(text)
    .bind(format_timestamp(posted_date))
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Update a note's title and text
pub async fn update_note(pool: &SqlitePool, note_id: i64, title: &str, text: &str) -> Result<()> {
    sqlx::query("UPDATE notes SET title = ?, text = ? WHERE id = ?")
        .bind(title)
        .bind(text)
        .bind(note_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete a note
pub async fn delete_note(pool: &SqlitePool, note_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM notes WHERE id = ?")
        .bind(note_id)
        .execute(pool)
        .await?;
    Ok(())
}
