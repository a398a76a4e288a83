//! Database models

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Artist {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Show {
    pub id: i64,
    pub artist_id: i64,
    pub venue_id: i64,
    pub show_date: DateTime<Utc>,
}

impl Show {
    /// True iff the show happened strictly before `now`
    pub fn in_past(&self, now: DateTime<Utc>) -> bool {
        self.show_date < now
    }
}

/// Show joined with its artist and venue names, for list rendering
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ShowWithNames {
    pub id: i64,
    pub artist_id: i64,
    pub artist_name: String,
    pub venue_id: i64,
    pub venue_name: String,
    pub show_date: DateTime<Utc>,
}

/// Entry in the "shows with most notes" ranking
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TopShow {
    pub id: i64,
    pub artist_id: i64,
    pub artist_name: String,
    pub venue_id: i64,
    pub venue_name: String,
    pub show_date: DateTime<Utc>,
    pub note_count: i64,
    /// Most recently posted note for this show, for deep-linking
    pub latest_note_id: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    pub show_id: i64,
    pub user_id: i64,
    pub title: String,
    pub text: String,
    pub posted_date: DateTime<Utc>,
}

/// Note joined with author and show context, for feeds
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct NoteWithContext {
    pub id: i64,
    pub show_id: i64,
    pub user_id: i64,
    pub username: String,
    pub artist_name: String,
    pub venue_name: String,
    pub show_date: DateTime<Utc>,
    pub title: String,
    pub text: String,
    pub posted_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_salt: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}
