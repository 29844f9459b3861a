//! raga-web - Raga knowledge service
//!
//! Serves static raga taxonomy (families, general information, moods,
//! thaats) enriched with text from a generative-language API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use raga_common::config::{default_config_path, resolve_api_key, TomlConfig};
use raga_common::TaxonomyStore;
use raga_web::services::GeminiClient;
use raga_web::{build_router, AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for raga-web
#[derive(Parser, Debug)]
#[command(name = "raga-web")]
#[command(about = "Raga knowledge service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5780", env = "RAGA_PORT")]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "RAGA_HOST")]
    host: std::net::IpAddr,

    /// TOML config file (defaults to <config dir>/raga/raga-web.toml)
    #[arg(short, long, env = "RAGA_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = match args.config.clone() {
        Some(path) => path,
        None => default_config_path()?,
    };
    let toml_config = TomlConfig::load_optional(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;
    let config_found = toml_config.is_some();
    let toml_config = toml_config.unwrap_or_default();

    // Initialize tracing; RUST_LOG overrides the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| toml_config.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting raga-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    if config_found {
        info!("Loaded config from {}", config_path.display());
    } else {
        warn!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
    }

    // Missing credential is fatal; there is no built-in fallback key
    let api_key = resolve_api_key(&toml_config).context("Cannot start without an API key")?;

    let taxonomy = Arc::new(TaxonomyStore::builtin().context("Failed to load raga taxonomy")?);
    info!(
        families = taxonomy.all_family_names().len(),
        ragas = taxonomy.general_raga_names().len(),
        moods = taxonomy.all_mood_labels().len(),
        indexed_names = taxonomy.unified_raga_names().len(),
        "✓ Taxonomy loaded"
    );

    let generator = GeminiClient::new(api_key, toml_config.model(), toml_config.base_url())
        .context("Failed to build generative-text client")?;
    info!(model = %toml_config.model(), "Generative-text client ready");

    let app = build_router(AppState::new(taxonomy, Arc::new(generator)));

    let addr = SocketAddr::new(args.host, args.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("raga-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

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
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}
