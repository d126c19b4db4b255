//! Relay errors and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Longest upstream error body quoted back to the caller.
const MAX_UPSTREAM_BODY: usize = 512;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0} ausente")]
    MissingCredential(&'static str),

    #[error("{provider} request timed out: {source}")]
    Timeout {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} request failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned {status}: {body}")]
    UpstreamStatus {
        provider: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{provider} returned an invalid JSON body: {reason}")]
    Decode {
        provider: &'static str,
        reason: String,
    },

    #[error("invalid request body: {0}")]
    InvalidRequest(String),
}

impl RelayError {
    /// Wrap a reqwest failure. The URL is dropped since the Gemini URL
    /// carries the API key.
    pub fn from_reqwest(provider: &'static str, err: reqwest::Error) -> Self {
        let source = err.without_url();
        if source.is_timeout() {
            RelayError::Timeout { provider, source }
        } else {
            RelayError::Transport { provider, source }
        }
    }

    pub fn upstream_status(provider: &'static str, status: reqwest::StatusCode, body: &str) -> Self {
        RelayError::UpstreamStatus {
            provider,
            status,
            body: truncate(body.trim(), MAX_UPSTREAM_BODY),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MissingCredential(_) => StatusCode::SERVICE_UNAVAILABLE,
            RelayError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            RelayError::Transport { .. }
            | RelayError::UpstreamStatus { .. }
            | RelayError::Decode { .. } => StatusCode::BAD_GATEWAY,
            RelayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &s[..end])
}
