//! Study Assistant - chat server for study help
//!
//! Serves a single-page chat UI and answers turns with either a rule-based
//! tutor or a hosted language model.

mod api;
mod assistant;
mod config;
mod llm;
mod tutor;

use api::{create_router, AppState};
use config::AppConfig;
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "study_assistant=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(true),
        )
        .init();

    // Configuration
    let config = AppConfig::from_env();
    let assistant = assistant::from_config(&config)?;

    let info = assistant.info();
    tracing::info!(
        backend = %info.backend,
        model = ?info.model,
        reply_delay_ms = %config.reply_delay.as_millis(),
        "Assistant backend initialized"
    );
    if info.credential_configured == Some(false) {
        tracing::warn!("No OPENAI_API_KEY configured. Chat requests will fail until it is set.");
    }

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new().gzip(true).br(true);

    let app = create_router(AppState::new(assistant))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Study assistant listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
