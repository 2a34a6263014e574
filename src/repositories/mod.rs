//! # Repository Layer
//!
//! This module contains repository implementations that encapsulate SeaORM operations
//! for database entities.

pub mod note;

pub use note::{NewNote, NoteChanges, NoteRepository};
