//! # Common API Types
//!
//! Response wrappers shared by the note and health endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::note::Model as NoteModel;

/// Acknowledgment returned by endpoints that do not echo a record
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome
    #[schema(example = "note created")]
    pub message: String,
}

impl MessageResponse {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Public representation of a note
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteDto {
    /// Note identity
    #[schema(example = 1)]
    pub id: i32,
    /// Display name
    #[schema(example = "Groceries")]
    pub name: String,
    /// Description, omitted when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "milk, eggs")]
    pub description: Option<String>,
    /// Creation timestamp (ISO 8601)
    #[schema(example = "2024-01-15T10:30:00Z")]
    pub created_at: String,
    /// Last update timestamp (ISO 8601)
    #[schema(example = "2024-01-15T10:30:00Z")]
    pub updated_at: String,
}

impl From<NoteModel> for NoteDto {
    fn from(note: NoteModel) -> Self {
        debug_assert!(
            note.is_visible(),
            "deleted note {} reached the response layer",
            note.id
        );

        Self {
            id: note.id,
            name: note.name,
            description: note.description.filter(|d| !d.is_empty()),
            created_at: note.created_at.to_rfc3339(),
            updated_at: note.updated_at.to_rfc3339(),
        }
    }
}

/// Single note with an acknowledgment message
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    #[schema(example = "note retrieved")]
    pub message: String,
    pub data: NoteDto,
}

/// Every visible note
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotesResponse {
    pub data: Vec<NoteDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn note_dto_omits_missing_description() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap().into();
        let dto = NoteDto::from(NoteModel {
            id: 3,
            name: "A".to_string(),
            description: None,
            created_at: at,
            updated_at: at,
            deleted_at: None,
        });

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["name"], "A");
        assert!(json.get("description").is_none());
        assert_eq!(json["created_at"], "2024-01-15T10:30:00+00:00");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "deleted note 4")]
    fn note_dto_refuses_deleted_notes() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap().into();
        let _ = NoteDto::from(NoteModel {
            id: 4,
            name: "A".to_string(),
            description: None,
            created_at: at,
            updated_at: at,
            deleted_at: Some(at),
        });
    }
}
