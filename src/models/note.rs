//! Note entity model
//!
//! This module contains the SeaORM entity model for the notes table, the only
//! entity of the service. Rows are never physically removed; a non-null
//! `deleted_at` hides them from every read and write path.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Note entity
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    /// Store-assigned identity (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name, never empty for a visible note
    pub name: String,

    /// Free-form description
    pub description: Option<String>,

    /// Timestamp when the note was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp of the last successful update
    pub updated_at: DateTimeWithTimeZone,

    /// Soft-delete marker
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Lifecycle of a note. The only transition is `Active` -> `Deleted`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteState {
    Active,
    Deleted { at: DateTimeWithTimeZone },
}

impl Model {
    /// Lifecycle state derived from the soft-delete marker.
    pub fn state(&self) -> NoteState {
        match self.deleted_at {
            Some(at) => NoteState::Deleted { at },
            None => NoteState::Active,
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state(), NoteState::Active)
    }
}

impl Entity {
    /// Select over notes that have not been soft-deleted.
    pub fn find_visible() -> Select<Entity> {
        Self::find().filter(Column::DeletedAt.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample(deleted_at: Option<DateTimeWithTimeZone>) -> Model {
        let created: DateTimeWithTimeZone = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap().into();
        Model {
            id: 1,
            name: "groceries".to_string(),
            description: None,
            created_at: created,
            updated_at: created,
            deleted_at,
        }
    }

    #[test]
    fn note_without_marker_is_active() {
        let note = sample(None);
        assert_eq!(note.state(), NoteState::Active);
        assert!(note.is_visible());
    }

    #[test]
    fn note_with_marker_is_deleted() {
        let at: DateTimeWithTimeZone = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap().into();
        let note = sample(Some(at));
        assert_eq!(note.state(), NoteState::Deleted { at });
        assert!(!note.is_visible());
    }
}
