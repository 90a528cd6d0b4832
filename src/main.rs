//! Databot relay server.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use databot::adapters::ai::{OpenAIAssistantsConfig, OpenAIAssistantsService};
use databot::adapters::http::{build_router, ChatAppState};
use databot::application::ChatSettings;
use databot::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    config.validate().context("invalid configuration")?;

    if !config.assistant.is_configured() {
        tracing::warn!(
            "OPENAI_API_KEY or ASSISTANT_ID is not set; chat requests will be refused"
        );
    }

    let settings = ChatSettings::from_config(&config.assistant);
    let service = OpenAIAssistantsService::new(OpenAIAssistantsConfig::from_app_config(
        &config.assistant,
    ))
    .context("failed to build assistants client")?;

    let state = ChatAppState::new(Arc::new(service), settings);
    let app = build_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(
        addr = %addr,
        environment = ?config.server.environment,
        "Starting databot relay"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await
        .context("server error")?;

    Ok(())
}
