//! # Server Configuration
//!
//! This module contains the router, shared state and serve loop for the Notes API.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router, middleware,
    routing::get,
};
use sea_orm::DatabaseConnection;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::handlers::{self, notes};
use crate::note_service::NoteService;
use crate::repositories::NoteRepository;
use crate::telemetry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseConnection,
    pub notes: NoteService,
}

impl AppState {
    /// Wires the note service onto an already verified connection pool.
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Self {
        let repo = NoteRepository::new(Arc::new(db.clone()));
        Self {
            config: Arc::new(config),
            db,
            notes: NoteService::new(repo),
        }
    }
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    let static_dir = &state.config.static_dir;
    let index_page = ServeFile::new(static_dir.join("index.html"));
    let static_files = ServeDir::new(static_dir);

    Router::new()
        .route_service("/", index_page)
        .route("/healthcheck", get(handlers::health_check))
        .route("/readyz", get(handlers::readiness))
        .route("/api/notes", get(notes::list_notes).post(notes::create_note))
        .route(
            "/api/notes/{id}",
            get(notes::get_note)
                .patch(notes::update_note)
                .delete(notes::delete_note),
        )
        .nest_service("/static", static_files)
        .fallback(handlers::not_found)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(telemetry::trace_context_middleware))
}

/// Serves the application until a shutdown signal arrives
pub async fn run_server(config: AppConfig, db: DatabaseConnection) -> anyhow::Result<()> {
    let addr = config.bind_addr().context("Invalid server address")?;
    let profile = config.profile.clone();

    let app = create_app(AppState::new(config, db));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, %profile, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("axum server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_check,
        crate::handlers::readiness,
        crate::handlers::notes::create_note,
        crate::handlers::notes::list_notes,
        crate::handlers::notes::get_note,
        crate::handlers::notes::update_note,
        crate::handlers::notes::delete_note,
    ),
    components(
        schemas(
            crate::error::ApiError,
            crate::note_service::NoteInput,
            crate::handlers::types::MessageResponse,
            crate::handlers::types::NoteDto,
            crate::handlers::types::NoteResponse,
            crate::handlers::types::NotesResponse,
        )
    ),
    tags(
        (name = "notes", description = "Note management"),
        (name = "health", description = "Liveness and readiness probes"),
    ),
    info(
        title = "Notes API",
        description = "API for managing notes",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
