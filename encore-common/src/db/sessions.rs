//! Session token storage
//!
//! Sessions are opaque server-side tokens; the cookie carries only the
//! token string. Rotating a session (after a password change) invalidates
//! the old token atomically from the client's point of view.

use crate::auth;
use crate::db::models::User;
use crate::time::format_timestamp;
use crate::{Clock, Result};
use sqlx::SqlitePool;

/// Create a session for a user, returning the new token
pub async fn create_session(pool: &SqlitePool, user_id: i64, clock: &Clock) -> Result<String> {
    let token = auth::generate_session_token();
    sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(user_id)
        .bind(format_timestamp(clock.now()))
        .execute(pool)
        .await?;
    Ok(token)
}

/// Resolve a session token to its user, if the token is live
pub async fn user_for_token(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT u.id, u.username, u.email, u.first_name, u.last_name, \
                u.password_salt, u.password_hash \
         FROM sessions s JOIN users u ON u.id = s.user_id \
         WHERE s.token = ?",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Delete one session (logout)
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

/// Invalidate every session a user holds (password change)
pub async fn delete_sessions_for_user(pool: &SqlitePool, user_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Rotate a user's session after a credential change: drop all existing
/// tokens and issue a fresh one
pub async fn rotate_session(pool: &SqlitePool, user_id: i64, clock: &Clock) -> Result<String> {
    delete_sessions_for_user(pool, user_id).await?;
    create_session(pool, user_id, clock).await
}
