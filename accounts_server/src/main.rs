//! User accounts server.
//!
//! Serves registration, login, profile edit and listing over HTTP, backed by
//! PostgreSQL or, with `--in-memory`, by a process-local store.

use std::sync::Arc;

use accounts::{
    AuthManager,
    db::{Database, InMemoryUserRepository, PgUserRepository, UserRepository},
};
use accounts_server::{
    api,
    config::{ConfigOverrides, ServerConfig},
    logging,
};
use anyhow::{Context, Error};
use pico_args::Arguments;
use tracing::info;

const HELP: &str = "\
Run the user accounts server

USAGE:
  accounts_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:3000]
  --db-url     URL         Database connection string  [default: env DATABASE_URL]

FLAGS:
  --in-memory              Keep users in memory instead of PostgreSQL
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  DATABASE_URL             PostgreSQL connection string
  JWT_SECRET               JWT signing secret (required, 32+ characters)
  TOKEN_TTL_SECS           Session token lifetime [default: 3600]
  PASSWORD_HASH            bcrypt | argon2 [default: bcrypt]
  PASSWORD_HASH_COST       bcrypt cost [default: 12]
  (See .env.example for all configuration options)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let overrides = ConfigOverrides {
        in_memory: pargs.contains("--in-memory"),
        bind: pargs
            .opt_value_from_str("--bind")
            .context("Invalid --bind address")?,
        database_url: pargs
            .opt_value_from_str("--db-url")
            .context("Invalid --db-url")?,
    };

    logging::init();

    let config = ServerConfig::from_env(overrides)?;
    config.validate()?;

    info!(
        "Starting accounts server at {} (passwords: {}, token ttl: {}s)",
        config.bind, config.security.password_algorithm, config.security.token_ttl_secs
    );

    let users: Arc<dyn UserRepository> = if config.in_memory {
        info!("Using in-memory user store; data is lost on exit");
        Arc::new(InMemoryUserRepository::new())
    } else {
        info!("Connecting to database");
        let db = Database::new(&config.database)
            .await
            .context("Failed to connect to database")?;
        db.migrate().await.context("Failed to prepare schema")?;
        info!("Database connected successfully");
        Arc::new(PgUserRepository::new(db.pool().clone()))
    };

    let auth_manager = Arc::new(AuthManager::new(
        users.clone(),
        config.security.auth_settings(),
    ));

    let app = api::create_router(api::AppState {
        auth_manager,
        users,
    });

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C signal handler: {e}");
        std::future::pending::<()>().await;
    }
}
