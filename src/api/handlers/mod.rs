use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use super::AppState;
use crate::error::StoreError;
use crate::models::*;

// ============================================================
// Error Handling
// ============================================================

/// Map a store error to a response.
///
/// Not-found and validation messages are safe to show the client. Storage failures are
/// logged in full and answered with a generic message.
fn store_error(e: StoreError) -> (StatusCode, String) {
    match e {
        StoreError::NotFound { .. } => {
            tracing::debug!("{}", e);
            (StatusCode::NOT_FOUND, e.to_string())
        }
        StoreError::Validation { .. } => {
            tracing::warn!("Validation error: {}", e);
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        }
        StoreError::Database(_) => {
            tracing::error!("Internal error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

/// `read(Some(id))` yields exactly one item or `NotFound`.
fn single<T>(mut items: Vec<T>) -> Json<T> {
    Json(items.swap_remove(0))
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Notes
// ============================================================

pub async fn list_notes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Note>>, (StatusCode, String)> {
    state.notes.read(None).map(Json).map_err(store_error)
}

pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Note>, (StatusCode, String)> {
    state.notes.read(Some(id)).map(single).map_err(store_error)
}

pub async fn create_note(
    State(state): State<AppState>,
    Json(input): Json<CreateNoteInput>,
) -> Result<(StatusCode, Json<Note>), (StatusCode, String)> {
    state
        .notes
        .create(input)
        .map(|n| (StatusCode::CREATED, Json(n)))
        .map_err(store_error)
}

pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateNoteInput>,
) -> Result<Json<Note>, (StatusCode, String)> {
    state.notes.update(id, input).map(Json).map_err(store_error)
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state.notes.delete(id).map_err(store_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(store_error(StoreError::note_not_found(id)))
    }
}

// ============================================================
// Groups
// ============================================================

pub async fn list_groups(
    State(state): State<AppState>,
) -> Result<Json<Vec<Group>>, (StatusCode, String)> {
    state.groups.read(None).map(Json).map_err(store_error)
}

pub async fn get_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Group>, (StatusCode, String)> {
    state.groups.read(Some(id)).map(single).map_err(store_error)
}

pub async fn create_group(
    State(state): State<AppState>,
    Json(input): Json<CreateGroupInput>,
) -> Result<(StatusCode, Json<Group>), (StatusCode, String)> {
    state
        .groups
        .create(input)
        .map(|g| (StatusCode::CREATED, Json(g)))
        .map_err(store_error)
}

pub async fn update_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateGroupInput>,
) -> Result<Json<Group>, (StatusCode, String)> {
    state.groups.update(id, input).map(Json).map_err(store_error)
}

pub async fn delete_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state.groups.delete(id).map_err(store_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(store_error(StoreError::group_not_found(id)))
    }
}
