//! # Notes API Main Entry Point
//!
//! This is the main entry point for the Notes API service.

use anyhow::Context;
use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use notes::{config::ConfigLoader, db, server::run_server, telemetry};

#[derive(Parser, Debug)]
#[command(name = "notes")]
#[command(about = "HTTP service for creating, listing, updating and deleting notes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration from layered env files and variables
    let config = ConfigLoader::new()
        .load()
        .context("loading configuration")?;

    telemetry::init_tracing(&config).context("initializing telemetry")?;

    tracing::info!(profile = %config.profile, "Loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(config = %redacted_json, "Effective configuration");
    }

    let db = db::init_pool(&config)
        .await
        .context("initializing database connection pool")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => {
            Migrator::up(&db, None).await.context("applying migrations")?;
            tracing::info!("Migrations applied");
        }
        Command::Serve => {
            if config.auto_migrate {
                Migrator::up(&db, None).await.context("applying migrations")?;
            }
            run_server(config, db.clone()).await?;
        }
    }

    db::close(db).await.context("closing database pool")?;
    Ok(())
}
