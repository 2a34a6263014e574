//! # Notes API Handlers
//!
//! This module contains handlers for note creation, retrieval, update and deletion.
//! Path identifiers are handed to the note service as raw strings so malformed ids
//! are reported as validation failures.

use axum::{
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderName, StatusCode, header::LOCATION},
    response::Json,
};

use crate::error::ApiError;
use crate::handlers::types::{MessageResponse, NoteDto, NoteResponse, NotesResponse};
use crate::note_service::{NoteInput, NoteService};
use crate::server::AppState;

/// Create a new note
#[utoipa::path(
    post,
    path = "/api/notes",
    request_body = NoteInput,
    responses(
        (status = 201, description = "Note created", body = MessageResponse, headers(
            ("Location", description = "URL of the created note")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "notes"
)]
pub async fn create_note(
    State(state): State<AppState>,
    payload: Result<Json<NoteInput>, JsonRejection>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<MessageResponse>), ApiError> {
    let Json(input) = payload?;

    let id = state.notes.create(input).await?;

    Ok((
        StatusCode::CREATED,
        [(LOCATION, format!("/api/notes/{}", id))],
        Json(MessageResponse::new("note created")),
    ))
}

/// List all notes
#[utoipa::path(
    get,
    path = "/api/notes",
    responses(
        (status = 200, description = "All notes that have not been deleted", body = NotesResponse),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "notes"
)]
pub async fn list_notes(State(state): State<AppState>) -> Result<Json<NotesResponse>, ApiError> {
    let notes = state.notes.get_all().await?;

    Ok(Json(NotesResponse {
        data: notes.into_iter().map(NoteDto::from).collect(),
    }))
}

/// Get a note by ID
#[utoipa::path(
    get,
    path = "/api/notes/{id}",
    params(
        ("id" = i32, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note retrieved", body = NoteResponse),
        (status = 400, description = "Invalid note ID", body = ApiError),
        (status = 404, description = "Note not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "notes"
)]
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NoteResponse>, ApiError> {
    let note = state.notes.get_by_id(&id).await?;

    Ok(Json(NoteResponse {
        message: "note retrieved".to_string(),
        data: note.into(),
    }))
}

/// Update a note
///
/// Empty fields in the body leave the stored values unchanged; `name` is still required.
#[utoipa::path(
    patch,
    path = "/api/notes/{id}",
    params(
        ("id" = i32, Path, description = "Note ID")
    ),
    request_body = NoteInput,
    responses(
        (status = 200, description = "Note updated", body = MessageResponse),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Note not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "notes"
)]
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NoteInput>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = NoteService::parse_id(&id)?;
    let Json(input) = payload?;

    state.notes.update(id, input).await?;

    Ok(Json(MessageResponse::new("note updated")))
}

/// Delete a note
#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    params(
        ("id" = i32, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted", body = MessageResponse),
        (status = 400, description = "Invalid note ID", body = ApiError),
        (status = 404, description = "Note not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "notes"
)]
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.notes.delete(&id).await?;

    Ok(Json(MessageResponse::new("note deleted")))
}
