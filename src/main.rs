// src/main.rs

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use moodlift::api::create_router;
use moodlift::config::AppConfig;
use moodlift::state::AppState;

#[derive(Parser)]
#[command(name = "moodlift")]
#[command(about = "Motivational quotes and a supportive chat companion over HTTP")]
struct Args {
    /// Bind address (overrides MOODLIFT_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port (overrides MOODLIFT_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = AppConfig::from_env();

    // RUST_LOG wins over MOODLIFT_LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    fmt().with_env_filter(filter).init();

    config.check_required()?;
    let missing = config.missing_required();
    if !missing.is_empty() {
        warn!(
            "Starting degraded, missing environment variables: {}",
            missing.join(", ")
        );
    }

    let app_state = Arc::new(AppState::from_config(&config));
    info!("Quotes model: {:?}", app_state.quotes_model);
    info!("Chat model: {:?}", app_state.chat_model);
    info!("Sentiment mode: {:?}", app_state.sentiment_mode);

    let app = create_router(app_state, &config.allowed_origins);

    let host = args.host.unwrap_or(config.host);
    let port = args.port.unwrap_or(config.port);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("MoodLift listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
