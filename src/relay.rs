//! Prompt relay.
//!
//! One outbound call per prompt, no retries. A successful provider body is
//! handed back byte-for-byte once it is known to be valid JSON; every
//! failure becomes a [`RelayError`].

use anyhow::Result;
use axum::body::Bytes;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use reqwest::Client;
use serde::de::IgnoredAny;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::{Credentials, RelayConfig};
use crate::error::RelayError;
use crate::provider::Provider;

/// Verbatim JSON body returned by a provider.
#[derive(Debug, Clone)]
pub struct ProviderReply {
    pub provider: Provider,
    pub body: Bytes,
}

impl ProviderReply {
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.body)
    }
}

impl IntoResponse for ProviderReply {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}

pub struct Relay {
    client: Client,
    credentials: Credentials,
    config: RelayConfig,
}

impl Relay {
    pub fn new(config: RelayConfig, credentials: Credentials) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            credentials,
            config,
        })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Forward `prompt` to `provider` and return its response body.
    pub async fn forward(
        &self,
        provider: Provider,
        prompt: &str,
    ) -> std::result::Result<ProviderReply, RelayError> {
        let start = Instant::now();
        let result = self.send(provider, prompt).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(reply) => info!(
                provider = provider.name(),
                bytes = reply.body.len(),
                elapsed_ms,
                "Relayed provider response"
            ),
            Err(e) => warn!(
                provider = provider.name(),
                elapsed_ms,
                error = %e,
                "Relay failed"
            ),
        }

        result
    }

    async fn send(
        &self,
        provider: Provider,
        prompt: &str,
    ) -> std::result::Result<ProviderReply, RelayError> {
        let name = provider.name();
        let api_key = self
            .credentials
            .get(provider)
            .ok_or(RelayError::MissingCredential(provider.credential_var()))?;

        debug!(provider = name, prompt_chars = prompt.chars().count(), "Calling provider");

        let resp = provider
            .build_request(&self.client, self.config.base_url(provider), api_key, prompt)
            .send()
            .await
            .map_err(|e| RelayError::from_reqwest(name, e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = describe_error_body(name, resp.text().await);
            return Err(RelayError::upstream_status(name, status, &body));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| RelayError::from_reqwest(name, e))?;

        serde_json::from_slice::<IgnoredAny>(&body).map_err(|e| RelayError::Decode {
            provider: name,
            reason: e.to_string(),
        })?;

        Ok(ProviderReply { provider, body })
    }
}

/// Text quoted back for a non-2xx provider response.
fn describe_error_body(provider: &str, read: reqwest::Result<String>) -> String {
    match read {
        Ok(body) if body.trim().is_empty() => "<empty body>".to_string(),
        Ok(body) => body,
        Err(e) => {
            let e = e.without_url();
            debug!(provider, error = %e, "Failed to read provider error body");
            format!("<body unreadable: {}>", e)
        }
    }
}
