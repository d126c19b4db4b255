//! Relay Configuration
//!
//! Defines the runtime configuration for the prompt relay:
//! - Provider credentials (read once from the environment)
//! - Listen address
//! - Upstream base URLs and timeout

use std::fmt;
use std::time::Duration;

use crate::provider::Provider;

pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Provider API keys.
///
/// Either key may be absent; that is only reported when the matching
/// route is called.
#[derive(Clone, Default)]
pub struct Credentials {
    gemini: Option<String>,
    openai: Option<String>,
}

impl Credentials {
    pub fn new(gemini: Option<String>, openai: Option<String>) -> Self {
        Self {
            gemini: non_empty(gemini),
            openai: non_empty(openai),
        }
    }

    /// Read both keys from the process environment.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var(GEMINI_API_KEY_VAR).ok(),
            std::env::var(OPENAI_API_KEY_VAR).ok(),
        )
    }

    /// Key for the given provider, if configured.
    pub fn get(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::Gemini => self.gemini.as_deref(),
            Provider::OpenAi => self.openai.as_deref(),
        }
    }

    pub fn has(&self, provider: Provider) -> bool {
        self.get(provider).is_some()
    }
}

// Keys must never reach the logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |k: &Option<String>| if k.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Credentials")
            .field("gemini", &redact(&self.gemini))
            .field("openai", &redact(&self.openai))
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Complete relay configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on a single outbound provider call
    pub timeout: Duration,
    pub gemini_base_url: String,
    pub openai_base_url: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
        }
    }
}

impl RelayConfig {
    /// Base URL used for the given provider, without a trailing slash.
    pub fn base_url(&self, provider: Provider) -> &str {
        let url = match provider {
            Provider::Gemini => &self.gemini_base_url,
            Provider::OpenAi => &self.openai_base_url,
        };
        url.trim_end_matches('/')
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
