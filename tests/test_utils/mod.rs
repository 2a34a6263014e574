//! Test utilities for database testing.
//!
//! This module provides utilities for setting up in-memory SQLite databases
//! with migrations applied, plus builders for the note service and router.

use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use notes::config::AppConfig;
use notes::note_service::NoteService;
use notes::repositories::NoteRepository;
use notes::server::{AppState, create_app};
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Sets up an in-memory SQLite database with all migrations applied and returns an Arc.
#[allow(dead_code)]
pub async fn setup_test_db_arc() -> Result<Arc<DatabaseConnection>> {
    let db = setup_test_db().await?;
    Ok(Arc::new(db))
}

/// Builds a note service over a fresh database, returning the connection for inspection.
#[allow(dead_code)]
pub async fn setup_note_service() -> Result<(NoteService, Arc<DatabaseConnection>)> {
    let db = setup_test_db_arc().await?;
    let service = NoteService::new(NoteRepository::new(db.clone()));
    Ok((service, db))
}

/// Builds the full application router over a fresh database.
#[allow(dead_code)]
pub async fn setup_test_app() -> Result<axum::Router> {
    let (app, _db) = setup_test_app_with_config(AppConfig::default()).await?;
    Ok(app)
}

/// Builds the router with the given configuration, returning the pool it shares.
#[allow(dead_code)]
pub async fn setup_test_app_with_config(
    config: AppConfig,
) -> Result<(axum::Router, DatabaseConnection)> {
    let db = setup_test_db().await?;
    let app = create_app(AppState::new(config, db.clone()));
    Ok((app, db))
}
