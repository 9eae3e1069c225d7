//! # Notifications Main Entry Point
//!
//! Loads configuration, installs telemetry and either serves the API or
//! applies pending migrations and exits.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use notifications::{config::ConfigLoader, db, server::run_server, telemetry};

#[derive(Debug, Parser)]
#[command(name = "notifications", version, about = "Tenant-scoped notification service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

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
            db::run_migrations(&db).await?;
            Ok(())
        }
        Command::Serve => {
            if config.auto_migrate {
                db::run_migrations(&db).await?;
            }
            run_server(config, db)
                .await
                .map_err(|err| anyhow!("server error: {}", err))
        }
    }
}
