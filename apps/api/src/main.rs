mod config;
mod errors;
mod evaluation;
mod extraction;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LlmProvider};
use crate::evaluation::evaluator::{Evaluator, EvaluatorConfig};
use crate::llm_client::{AnthropicClient, CompletionProvider, GeminiClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM provider
    let provider = build_provider(&config)?;
    info!(
        "LLM provider initialized ({}, model: {}, timeout: {}s)",
        provider.name(),
        config.llm_model,
        config.llm_timeout.as_secs()
    );

    let evaluator = Evaluator::new(
        provider,
        EvaluatorConfig {
            model: config.llm_model.clone(),
            timeout: config.llm_timeout,
        },
    );

    // Build app state
    let state = AppState {
        evaluator: Arc::new(evaluator),
    };

    // Build router
    let app = build_router(state, config.max_upload_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs the model backend selected by `LLM_PROVIDER`.
fn build_provider(config: &Config) -> Result<Arc<dyn CompletionProvider>> {
    let api_key = config.llm_api_key.clone();
    let base_url = config.llm_base_url.as_deref();

    let provider: Arc<dyn CompletionProvider> = match config.llm_provider {
        LlmProvider::Gemini => {
            let client = GeminiClient::new(api_key)?;
            Arc::new(match base_url {
                Some(url) => client.with_base_url(url),
                None => client,
            })
        }
        LlmProvider::Anthropic => {
            let client = AnthropicClient::new(api_key)?;
            Arc::new(match base_url {
                Some(url) => client.with_base_url(url),
                None => client,
            })
        }
    };

    Ok(provider)
}
