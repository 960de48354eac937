//! tm-web - Top Movies web service
//!
//! Serves the movie list, edit/delete forms and the add-by-search flow.
//! Configuration comes from CLI arguments, environment (including a `.env`
//! file), an optional TOML file and built-in defaults, in that order.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tm_common::config::{load_toml_config, AppConfig, ConfigOverrides};
use tm_common::db::init::init_database;
use tm_web::catalog::TmdbClient;
use tm_web::{build_router, AppState};
use tokio::signal;
use tracing::info;

/// Command-line arguments for tm-web
#[derive(Parser, Debug)]
#[command(name = "tm-web")]
#[command(about = "Personal top movies list")]
#[command(version)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long, env = "TM_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite connection string, e.g. sqlite://movies.db
    #[arg(long, env = "TM_DATABASE_URL")]
    database_url: Option<String>,

    /// Address to listen on
    #[arg(long, env = "TM_BIND_ADDR")]
    bind_addr: Option<String>,

    /// TMDB API read access token
    #[arg(long, env = "TM_TMDB_TOKEN", hide_env_values = true)]
    tmdb_token: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TM_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            database_url: self.database_url.clone(),
            bind_addr: self.bind_addr.clone(),
            tmdb_token: self.tmdb_token.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is normal
    let _ = dotenv::dotenv();

    let args = Args::parse();
    let file = load_toml_config(args.config.as_deref())?;
    let config = AppConfig::resolve(args.overrides(), file)?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!(
        "Starting Top Movies (tm-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Database: {}", config.database_url);

    let pool = init_database(&config.database_url)
        .await
        .context("Failed to open database")?;
    info!("✓ Database ready");

    let catalog = TmdbClient::new(&config.tmdb).context("Failed to build TMDB client")?;
    let state = AppState::new(pool, Arc::new(catalog), config.tmdb.image_base_url.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    info!("tm-web listening on http://{}", config.bind_addr);
    info!("Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
