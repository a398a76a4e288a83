//! User queries

use crate::auth;
use crate::db::models::User;
use crate::{Error, Result};
use sqlx::SqlitePool;

const USER_COLUMNS: &str =
    "id, username, email, first_name, last_name, password_salt, password_hash";

/// Fetch one user by id
pub async fn get_user(pool: &SqlitePool, user_id: i64) -> Result<User> {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("user {}", user_id)))
}

/// Fetch one user by username, for login
pub async fn find_user_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE username = ?",
        USER_COLUMNS
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// True if another user (excluding `exclude_id`) already holds this username
pub async fn username_in_use(
    pool: &SqlitePool,
    username: &str,
    exclude_id: Option<i64>,
) -> Result<bool> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = ? AND id != ?")
            .bind(username)
            .bind(exclude_id.unwrap_or(0))
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

/// True if another user (excluding `exclude_id`) already holds this email
pub async fn email_in_use(pool: &SqlitePool, email: &str, exclude_id: Option<i64>) -> Result<bool> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = ? AND id != ?")
        .bind(email)
        .bind(exclude_id.unwrap_or(0))
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Create a user with a freshly salted password hash
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    first_name: &str,
    last_name: &str,
    password: &str,
) -> Result<i64> {
    let salt = auth::generate_salt();
    let hash = auth::hash_password(&salt, password);

    let result = sqlx::query(
        "INSERT INTO users (username, email, first_name, last_name, password_salt, password_hash) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(username)
    .bind(email)
    .bind(first_name)
    .bind(last_name)
    .bind(salt)
    .bind(hash)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Update account info (username, email, first/last name)
pub async fn update_user(
    pool: &SqlitePool,
    user_id: i64,
    username: &str,
    email: &str,
    first_name: &str,
    last_name: &str,
) -> Result<()> {
    sqlx::query(
        "UPDATE users SET username = ?, email = ?, first_name = ?, last_name = ? WHERE id = ?",
    )
    .bind(username)
    .bind(email)
    .bind(first_name)
    .bind(last_name)
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Replace a user's password with a new salted hash
pub async fn set_password(pool: &SqlitePool, user_id: i64, password: &str) -> Result<()> {
    let salt = auth::generate_salt();
    let hash = auth::hash_password(&salt, password);

    sqlx::query("UPDATE users SET password_salt = ?, password_hash = ? WHERE id = ?")
        .bind(salt)
        .bind(hash)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}
