//! HTTP server setup and routing

use crate::handlers;
use crate::importer::CatalogClient;
use axum::routing::{get, post};
use axum::Router;
use encore_common::Clock;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

/// Shared application context passed to all handlers
#[derive(Clone)]
pub struct AppContext {
    pub db: SqlitePool,
    /// Injected clock; tests pin it so the past-show rule is deterministic
    pub clock: Clock,
    pub catalog: CatalogClient,
}

/// Build the application router with all routes
pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(handlers::health))
        // Artists
        .route("/artists", get(handlers::artists::artist_list))
        .route("/artists/:artist_id", get(handlers::artists::artist_detail))
        .route(
            "/artists/:artist_id/shows",
            get(handlers::artists::shows_for_artist),
        )
        // Venues
        .route("/venues", get(handlers::venues::venue_list))
        .route("/venues/:venue_id", get(handlers::venues::venue_detail))
        .route(
            "/venues/:venue_id/shows",
            get(handlers::venues::shows_at_venue),
        )
        // Shows and notes
        .route("/shows/top", get(handlers::shows::top_shows))
        .route(
            "/shows/:show_id/notes",
            get(handlers::notes::notes_for_show).post(handlers::notes::create_note),
        )
        .route(
            "/shows/:show_id/notes/new",
            get(handlers::notes::new_note_form),
        )
        .route("/notes/latest", get(handlers::notes::latest_notes))
        .route("/notes/:note_id", get(handlers::notes::note_detail))
        .route("/notes/:note_id/edit", post(handlers::notes::edit_note))
        .route("/notes/:note_id/delete", post(handlers::notes::delete_note))
        .route(
            "/notes/:note_id/delete/confirm",
            post(handlers::notes::delete_note_confirm),
        )
        // Users and accounts
        .route("/users/:user_id", get(handlers::users::user_profile))
        .route("/profile", get(handlers::users::my_profile))
        .route("/users/:user_id/edit", post(handlers::users::edit_account))
        .route(
            "/users/:user_id/password",
            post(handlers::users::change_password),
        )
        .route("/accounts/register", post(handlers::accounts::register))
        .route("/accounts/login", post(handlers::accounts::login))
        .route("/accounts/logout", post(handlers::accounts::logout))
        // Catalog import triggers
        .route("/admin/import/artists", get(handlers::import::import_artists))
        .route("/admin/import/venues", get(handlers::import::import_venues))
        .route("/admin/import/shows", get(handlers::import::import_shows))
        // Attach application context
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
}
