//! User profiles, account info updates and password changes

use crate::error::WebError;
use crate::policy;
use crate::response::{envelope, envelope_with};
use crate::server::AppContext;
use crate::session::{self, AuthUser, Viewer};
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use encore_common::db::{notes, sessions, users};
use encore_common::validate::{
    validate_account_form, validate_password_form, AccountForm, FieldError, PasswordForm,
};
use encore_common::{auth, Error};
use serde_json::{json, Value};

/// GET /users/:id - public profile with that user's notes. Email, full
/// name and edit controls appear only on the viewer's own profile.
pub async fn user_profile(
    State(ctx): State<AppContext>,
    viewer: Viewer,
    Path(user_id): Path<i64>,
) -> Result<Json<Value>, WebError> {
    let user = users::get_user(&ctx.db, user_id).await?;
    let user_notes = notes::notes_for_user(&ctx.db, user_id).await?;

    let mut profile = json!({
        "id": user.id,
        "username": user.username,
    });
    if policy::show_private_fields(viewer.id(), user.id) {
        profile["email"] = json!(user.email);
        profile["first_name"] = json!(user.first_name);
        profile["last_name"] = json!(user.last_name);
        profile["can_edit"] = json!(true);
    }

    Ok(envelope(json!({
        "user_profile": profile,
        "notes": user_notes,
    })))
}

/// GET /profile - redirect to the logged-in user's own profile
pub async fn my_profile(user: AuthUser) -> Response {
    let location = format!("/users/{}", user.user.id);
    (
        axum::http::StatusCode::FOUND,
        [(header::LOCATION, location)],
    )
        .into_response()
}

/// POST /users/:id/edit - update username, email, first and last name.
/// Only the account holder may do this; duplicate username/email come
/// back as field errors.
pub async fn edit_account(
    State(ctx): State<AppContext>,
    user: AuthUser,
    Path(user_id): Path<i64>,
    Json(form): Json<AccountForm>,
) -> Result<Json<Value>, WebError> {
    let target = users::get_user(&ctx.db, user_id).await?;

    policy::account_mutation(Some(user.user.id), target.id)
        .require(&format!("/users/{}/edit", user_id))?;

    let mut errors = validate_account_form(&form);
    if users::username_in_use(&ctx.db, &form.username, Some(target.id)).await? {
        errors.push(FieldError::new(
            "username",
            "A user with that username already exists.",
        ));
    }
    if users::email_in_use(&ctx.db, &form.email, Some(target.id)).await? {
        errors.push(FieldError::new(
            "email",
            "A user with that email address already exists.",
        ));
    }
    if !errors.is_empty() {
        return Err(Error::Validation(errors).into());
    }

    users::update_user(
        &ctx.db,
        target.id,
        &form.username,
        &form.email,
        &form.first_name,
        &form.last_name,
    )
    .await?;
    let updated = users::get_user(&ctx.db, target.id).await?;

    Ok(envelope_with(
        json!({ "user": updated }),
        &["Your account information has been successfully updated!"],
    ))
}

/// POST /users/:id/password - change the account password. The session
/// token is rotated on success so the old cookie stops working.
pub async fn change_password(
    State(ctx): State<AppContext>,
    user: AuthUser,
    Path(user_id): Path<i64>,
    Json(form): Json<PasswordForm>,
) -> Result<Response, WebError> {
    let target = users::get_user(&ctx.db, user_id).await?;

    policy::account_mutation(Some(user.user.id), target.id)
        .require(&format!("/users/{}/password", user_id))?;

    let mut errors = validate_password_form(&form);
    if !auth::verify_password(
        &target.password_salt,
        &target.password_hash,
        &form.old_password,
    ) {
        errors.push(FieldError::new(
            "old_password",
            "Your old password was entered incorrectly.",
        ));
    }
    if !errors.is_empty() {
        return Err(Error::Validation(errors).into());
    }

    users::set_password(&ctx.db, target.id, &form.new_password1).await?;
    let token = sessions::rotate_session(&ctx.db, target.id, &ctx.clock).await?;
    let cookie = session::session_cookie(&token).map_err(WebError::from)?;

    let body = envelope_with(
        json!({ "user_id": target.id }),
        &["Your password was successfully updated!"],
    );
    Ok(([(header::SET_COOKIE, cookie)], body).into_response())
}
