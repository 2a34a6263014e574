//! # Note Repository
//!
//! This module contains the repository implementation for Note entities. It is the
//! only reader and writer of the notes table and hides soft-deleted rows from every
//! operation.

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;

use crate::error::RepositoryError;
use crate::models::note::{self, Column, Entity as Note, Model as NoteModel};

/// Data for inserting a new note
#[derive(Debug, Clone)]
pub struct NewNote {
    pub name: String,
    pub description: Option<String>,
}

/// Partial update applied by [`NoteRepository::update`].
///
/// Fields holding their zero value (empty string, `None`) are skipped and the
/// stored value is kept.
#[derive(Debug, Clone, Default)]
pub struct NoteChanges {
    pub name: String,
    pub description: String,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

impl NoteChanges {
    fn column_values(&self) -> Vec<(Column, SimpleExpr)> {
        let mut values = Vec::new();

        if !self.name.is_empty() {
            values.push((Column::Name, Expr::value(self.name.clone())));
        }
        if !self.description.is_empty() {
            values.push((Column::Description, Expr::value(self.description.clone())));
        }
        if let Some(updated_at) = self.updated_at {
            values.push((Column::UpdatedAt, Expr::value(updated_at)));
        }

        values
    }
}

/// Repository for note database operations
#[derive(Debug, Clone)]
pub struct NoteRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl NoteRepository {
    /// Creates a new NoteRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Inserts a note and returns the identity assigned by the store.
    ///
    /// `created_at` and `updated_at` receive the same instant.
    pub async fn create(&self, note: NewNote) -> Result<i32, RepositoryError> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let active_model = note::ActiveModel {
            name: Set(note.name),
            description: Set(note.description),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let result = Note::insert(active_model)
            .exec(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(result.last_insert_id)
    }

    /// Returns the visible note with the given identity
    pub async fn get_by_id(&self, id: i32) -> Result<NoteModel, RepositoryError> {
        Note::find_visible()
            .filter(Column::Id.eq(id))
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::NotFound(format!("Note with ID '{}' not found", id)))
    }

    /// Returns every visible note, ordered by identity
    pub async fn get_all(&self) -> Result<Vec<NoteModel>, RepositoryError> {
        let notes = Note::find_visible()
            .order_by_asc(Column::Id)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(notes)
    }

    /// Merges `changes` into the visible note with the given identity.
    ///
    /// Zero-valued fields are not written. When nothing is left to write the note
    /// is only checked for visibility.
    pub async fn update(&self, id: i32, changes: NoteChanges) -> Result<(), RepositoryError> {
        let values = changes.column_values();
        if values.is_empty() {
            return self.get_by_id(id).await.map(|_| ());
        }

        let mut update = Note::update_many();
        for (column, value) in values {
            update = update.col_expr(column, value);
        }

        let result = update
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Note with ID '{}' not found",
                id
            )));
        }

        Ok(())
    }

    /// Marks the visible note with the given identity as deleted.
    ///
    /// The row stays in the table; a note that is missing or already deleted is
    /// reported as not found.
    pub async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let result = Note::update_many()
            .col_expr(Column::DeletedAt, Expr::value(Some(now)))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Note with ID '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
