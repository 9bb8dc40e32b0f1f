mod handlers;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Database;
use crate::store::{GroupStore, NoteStore};

/// Stores shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub notes: NoteStore,
    pub groups: GroupStore,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            notes: NoteStore::new(db.clone()),
            groups: GroupStore::new(db),
        }
    }
}

pub fn create_router(db: Database) -> Router {
    let api = Router::new()
        // Notes
        .route("/notes", get(handlers::list_notes))
        .route("/notes", post(handlers::create_note))
        .route("/notes/{id}", get(handlers::get_note))
        .route("/notes/{id}", put(handlers::update_note))
        .route("/notes/{id}", delete(handlers::delete_note))
        // Groups
        .route("/groups", get(handlers::list_groups))
        .route("/groups", post(handlers::create_group))
        .route("/groups/{id}", get(handlers::get_group))
        .route("/groups/{id}", put(handlers::update_group))
        .route("/groups/{id}", delete(handlers::delete_group))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState::new(db))
}
