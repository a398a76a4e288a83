//! Registration, login and logout

use crate::error::WebError;
use crate::response::{envelope, envelope_with};
use crate::server::AppContext;
use crate::session::{self, Viewer};
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use encore_common::db::{sessions, users};
use encore_common::validate::{validate_registration_form, FieldError, RegistrationForm};
use encore_common::{auth, Error};
use serde::Deserialize;
use serde_json::json;

/// POST /accounts/register - create an account and log it straight in
pub async fn register(
    State(ctx): State<AppContext>,
    Json(form): Json<RegistrationForm>,
) -> Result<Response, WebError> {
    let mut errors = validate_registration_form(&form);
    if users::username_in_use(&ctx.db, &form.username, None).await? {
        errors.push(FieldError::new(
            "username",
            "A user with that username already exists.",
        ));
    }
    if users::email_in_use(&ctx.db, &form.email, None).await? {
        errors.push(FieldError::new(
            "email",
            "A user with that email address already exists.",
        ));
    }
    if !errors.is_empty() {
        return Err(Error::Validation(errors).into());
    }

    let user_id = users::create_user(
        &ctx.db,
        &form.username,
        &form.email,
        &form.first_name,
        &form.last_name,
        &form.password1,
    )
    .await?;

    let token = sessions::create_session(&ctx.db, user_id, &ctx.clock).await?;
    let cookie = session::session_cookie(&token).map_err(WebError::from)?;
    let user = users::get_user(&ctx.db, user_id).await?;

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        envelope(json!({ "user": user })),
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    /// Destination to continue to after login, from the redirect flow
    pub next: Option<String>,
}

/// POST /accounts/login - check credentials, set the session cookie and
/// redirect to `next` (or the user's own profile)
pub async fn login(
    State(ctx): State<AppContext>,
    Json(form): Json<LoginForm>,
) -> Result<Response, WebError> {
    let user = users::find_user_by_username(&ctx.db, &form.username).await?;

    let user = match user {
        Some(u) if auth::verify_password(&u.password_salt, &u.password_hash, &form.password) => u,
        // Same failure shape whether the username or the password is wrong
        _ => {
            return Err(Error::Validation(vec![FieldError::new(
                "__all__",
                "Please enter a correct username and password.",
            )])
            .into())
        }
    };

    let token = sessions::create_session(&ctx.db, user.id, &ctx.clock).await?;
    let cookie = session::session_cookie(&token).map_err(WebError::from)?;
    let location = form
        .next
        .filter(|n| n.starts_with('/'))
        .unwrap_or_else(|| format!("/users/{}", user.id));

    Ok((
        StatusCode::FOUND,
        [
            (header::SET_COOKIE, cookie),
            (
                header::LOCATION,
                header::HeaderValue::from_str(&location)
                    .map_err(|e| Error::Internal(format!("invalid redirect target: {}", e)))
                    .map_err(WebError::from)?,
            ),
        ],
    )
        .into_response())
}

/// POST /accounts/logout - drop the session and tell the user so
pub async fn logout(
    State(ctx): State<AppContext>,
    _viewer: Viewer,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    if let Some(token) = session::session_token(&headers) {
        sessions::delete_session(&ctx.db, &token).await?;
    }

    let body = envelope_with(json!({}), &["You have been logged out."]);
    Ok((
        [(header::SET_COOKIE, session::clear_session_cookie())],
        body,
    )
        .into_response())
}
