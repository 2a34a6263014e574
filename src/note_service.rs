//! Note service
//!
//! Validates and normalizes note requests, turns external identifiers into
//! internal keys, and drives the [`NoteRepository`].

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::error::NoteServiceError;
use crate::models::note::Model as NoteModel;
use crate::repositories::{NewNote, NoteChanges, NoteRepository};

/// Payload accepted by create and update.
///
/// Both fields default to empty so a missing `name` is reported as a validation
/// failure rather than a decoding error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NoteInput {
    /// Display name (required, non-empty)
    #[serde(default)]
    #[schema(example = "Groceries")]
    pub name: String,
    /// Optional description; empty on update keeps the stored value
    #[serde(default)]
    #[schema(example = "milk, eggs")]
    pub description: String,
}

/// Business rules for notes
#[derive(Debug, Clone)]
pub struct NoteService {
    repo: NoteRepository,
}

impl NoteService {
    pub fn new(repo: NoteRepository) -> Self {
        Self { repo }
    }

    /// Parses an external identifier into a note key.
    pub fn parse_id(id: &str) -> Result<i32, NoteServiceError> {
        id.parse::<i32>().map_err(|_| {
            NoteServiceError::validation("id", format!("invalid note id '{}'", id))
        })
    }

    /// Creates a note and returns its assigned identity.
    #[instrument(skip_all)]
    pub async fn create(&self, input: NoteInput) -> Result<i32, NoteServiceError> {
        validate_name(&input.name, "name is required")?;

        let description = Some(input.description).filter(|d| !d.is_empty());
        let id = self
            .repo
            .create(NewNote {
                name: input.name,
                description,
            })
            .await?;

        debug!(note_id = id, "note created");
        Ok(id)
    }

    /// Applies `input` to an existing note.
    ///
    /// Only non-empty fields are written, so an empty description leaves the
    /// stored one untouched.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: NoteInput) -> Result<(), NoteServiceError> {
        validate_name(&input.name, "can't update with an empty name")?;

        let changes = NoteChanges {
            name: input.name,
            description: input.description,
            updated_at: Some(Utc::now().into()),
        };

        self.repo
            .update(id, changes)
            .await
            .map_err(|e| NoteServiceError::from_repository(id, e))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), NoteServiceError> {
        let id = Self::parse_id(id)?;

        self.repo
            .delete(id)
            .await
            .map_err(|e| NoteServiceError::from_repository(id, e))
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<NoteModel, NoteServiceError> {
        let id = Self::parse_id(id)?;

        self.repo.get_by_id(id).await.map_err(|e| {
            debug!(note_id = id, error = %e, "note lookup failed");
            NoteServiceError::from_repository(id, e)
        })
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<NoteModel>, NoteServiceError> {
        Ok(self.repo.get_all().await?)
    }
}

fn validate_name(name: &str, message: &str) -> Result<(), NoteServiceError> {
    if name.trim().is_empty() {
        return Err(NoteServiceError::validation("name", message));
    }
    Ok(())
}
