//! predict-api entry point.
//!
//! Parses the command line, loads configuration from TOML, initializes
//! tracing, builds the Axum router and serves it until a shutdown signal.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use predict_api::config::{AppConfig, DEFAULT_BIND, DEFAULT_LOG_FILTER};
use predict_api::http::start_server;
use predict_api::routes::create_router;

/// predict-api: liveness probe and file-upload prediction endpoint
#[derive(Parser, Debug)]
#[command(name = "predict-api", version, about)]
struct Args {
    /// Path to configuration file (defaults to config/default.toml if present)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "predict_api=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Host to bind, overriding the config file
    #[arg(long)]
    host: Option<String>,

    #[arg(long, help = format!("Port to bind, overriding the config file (default bind {})", DEFAULT_BIND))]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = AppConfig::load_or_default(args.config.as_deref())?;
    config.apply_overrides(args.host, args.port)?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry = tracing_subscriber::registry().with(EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        host = %config.http.host,
        port = config.http.port,
        max_body_bytes = config.upload.max_body_bytes,
        "Loaded configuration"
    );

    let app = create_router(&config);
    start_server(app, &config).await?;

    Ok(())
}
