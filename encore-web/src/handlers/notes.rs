//! Note feeds, creation, editing and two-phase deletion

use crate::error::WebError;
use crate::policy;
use crate::response::{envelope, envelope_with};
use crate::server::AppContext;
use crate::session::AuthUser;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use encore_common::db::{notes, shows};
use encore_common::validate::{validate_note_form, NoteForm};
use encore_common::Error;
use serde::Deserialize;
use serde_json::{json, Value};

/// GET /notes/latest - the 20 most recent notes, newest first
pub async fn latest_notes(State(ctx): State<AppContext>) -> Result<Json<Value>, WebError> {
    let notes = notes::latest_notes(&ctx.db, notes::LATEST_NOTES_LIMIT).await?;
    Ok(envelope(json!({ "notes": notes, "title": "Latest Notes" })))
}

/// GET /shows/:id/notes - notes for one show, newest first
pub async fn notes_for_show(
    State(ctx): State<AppContext>,
    Path(show_id): Path<i64>,
) -> Result<Json<Value>, WebError> {
    let show = shows::get_show_with_names(&ctx.db, show_id).await?;
    let notes = notes::notes_for_show(&ctx.db, show_id).await?;
    Ok(envelope(json!({ "show": show, "notes": notes })))
}

/// GET /notes/:id - one note
pub async fn note_detail(
    State(ctx): State<AppContext>,
    Path(note_id): Path<i64>,
) -> Result<Json<Value>, WebError> {
    let note = notes::get_note(&ctx.db, note_id).await?;
    Ok(envelope(json!({ "note": note })))
}

/// GET /shows/:id/notes/new - blank note form context (login required)
pub async fn new_note_form(
    State(ctx): State<AppContext>,
    _user: AuthUser,
    Path(show_id): Path<i64>,
) -> Result<Json<Value>, WebError> {
    let show = shows::get_show_with_names(&ctx.db, show_id).await?;
    Ok(envelope(json!({
        "show": show,
        "form": { "title": "", "text": "" },
    })))
}

/// POST /shows/:id/notes - create a note for a show the viewer attended.
/// A note cannot be added for a show that has not happened yet.
pub async fn create_note(
    State(ctx): State<AppContext>,
    user: AuthUser,
    Path(show_id): Path<i64>,
    Json(form): Json<NoteForm>,
) -> Result<impl IntoResponse, WebError> {
    let show = shows::get_show(&ctx.db, show_id).await?;

    if !show.in_past(ctx.clock.now()) {
        return Err(Error::BadRequest(
            "cannot add a note for a show that has not happened yet".to_string(),
        )
        .into());
    }

    let errors = validate_note_form(&form);
    if !errors.is_empty() {
        return Err(Error::Validation(errors).into());
    }

    let note_id = notes::create_note(
        &ctx.db,
        show_id,
        user.user.id,
        &form.title,
        &form.text,
        ctx.clock.now(),
    )
    .await?;
    let note = notes::get_note(&ctx.db, note_id).await?;

    Ok((StatusCode::CREATED, envelope(json!({ "note": note }))))
}

/// POST /notes/:id/edit - edit a note; only its author may do so
pub async fn edit_note(
    State(ctx): State<AppContext>,
    user: AuthUser,
    Path(note_id): Path<i64>,
    Json(form): Json<NoteForm>,
) -> Result<Json<Value>, WebError> {
    let note = notes::get_note(&ctx.db, note_id).await?;

    policy::note_mutation(Some(user.user.id), note.user_id)
        .require(&format!("/notes/{}/edit", note_id))?;

    let errors = validate_note_form(&form);
    if !errors.is_empty() {
        return Err(Error::Validation(errors).into());
    }

    notes::update_note(&ctx.db, note_id, &form.title, &form.text).await?;
    let note = notes::get_note(&ctx.db, note_id).await?;
    Ok(envelope(json!({ "note": note })))
}

/// POST /notes/:id/delete - phase 1 of deletion: answer with a
/// confirmation prompt, mutate nothing
pub async fn delete_note(
    State(ctx): State<AppContext>,
    user: AuthUser,
    Path(note_id): Path<i64>,
) -> Result<Json<Value>, WebError> {
    let note = notes::get_note(&ctx.db, note_id).await?;

    policy::note_mutation(Some(user.user.id), note.user_id)
        .require(&format!("/notes/{}/delete", note_id))?;

    Ok(envelope(json!({
        "note": note,
        "confirm_required": true,
    })))
}

#[derive(Debug, Deserialize)]
pub struct DeleteConfirmation {
    #[serde(default)]
    pub confirm: String,
}

/// POST /notes/:id/delete/confirm - phase 2 of deletion. Ownership and
/// existence are re-checked against current state; the note may have been
/// changed or removed since phase 1. Anything but confirm=yes is a no-op
/// returning the note detail.
pub async fn delete_note_confirm(
    State(ctx): State<AppContext>,
    user: AuthUser,
    Path(note_id): Path<i64>,
    Json(confirmation): Json<DeleteConfirmation>,
) -> Result<Json<Value>, WebError> {
    let note = notes::get_note(&ctx.db, note_id).await?;

    if confirmation.confirm != "yes" {
        return Ok(envelope(json!({ "note": note })));
    }

    policy::note_mutation(Some(user.user.id), note.user_id)
        .require(&format!("/notes/{}/delete/confirm", note_id))?;

    notes::delete_note(&ctx.db, note_id).await?;
    Ok(envelope_with(
        json!({ "deleted": note_id }),
        &["Your note has been deleted."],
    ))
}
