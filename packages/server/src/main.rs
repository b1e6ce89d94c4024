// Main entry point for the giveaway analysis API server

use anyhow::{Context, Result};
use gemini_client::GeminiClient;
use giveaway::Model;
use server_core::{build_app, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,giveaway=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting giveaway analysis API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Build the model client; the API key is passed in explicitly
    let mut client = GeminiClient::new(config.gemini_api_key);
    if let Some(base_url) = config.gemini_base_url {
        client = client.with_base_url(base_url);
    }
    tracing::info!(model = client.model(), "Gemini client ready");

    let app = build_app(Box::new(client) as Box<dyn Model>);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
