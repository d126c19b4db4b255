//! Relay HTTP Server
//!
//! ```text
//! caller ── POST /api/gemini ──► Relay ──► Gemini generateContent
//!        ── POST /api/openai ──► Relay ──► OpenAI chat/completions
//! ```
//!
//! Success: the provider's JSON body, status 200.
//! Failure: `{"error": "..."}` with a non-200 status.

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::provider::Provider;
use crate::relay::{ProviderReply, Relay};
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

// ============================================================================
// REQUEST TYPES
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub prompt: String,
}

// ============================================================================
// HANDLERS
// ============================================================================

pub async fn health_check() -> &'static str {
    "OK"
}

/// POST /api/gemini
pub async fn relay_gemini(
    State(relay): State<Arc<Relay>>,
    payload: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<ProviderReply, RelayError> {
    relay_prompt(&relay, Provider::Gemini, payload).await
}

/// POST /api/openai
pub async fn relay_openai(
    State(relay): State<Arc<Relay>>,
    payload: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<ProviderReply, RelayError> {
    relay_prompt(&relay, Provider::OpenAi, payload).await
}

async fn relay_prompt(
    relay: &Relay,
    provider: Provider,
    payload: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<ProviderReply, RelayError> {
    let Json(req) = payload.map_err(|e| RelayError::InvalidRequest(e.body_text()))?;
    relay.forward(provider, &req.prompt).await
}

// ============================================================================
// SERVER STARTUP
// ============================================================================

pub fn router(relay: Arc<Relay>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(Provider::Gemini.route(), post(relay_gemini))
        .route(Provider::OpenAi.route(), post(relay_openai))
        // Prompts have no size limit.
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(relay)
}

pub async fn run_server(relay: Relay) -> anyhow::Result<()> {
    let config: &RelayConfig = relay.config();
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Prompt relay listening on {}", addr);
    for provider in Provider::ALL {
        info!(
            "  POST {:12} -> {} ({} {})",
            provider.route(),
            config.base_url(provider),
            provider.credential_var(),
            if relay.credentials().has(provider) {
                "set"
            } else {
                "missing"
            }
        );
    }

    axum::serve(listener, router(Arc::new(relay))).await?;

    Ok(())
}
