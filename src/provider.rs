//! Upstream LLM providers.
//!
//! Each provider knows its endpoint, where its API key goes and the shape
//! of the request body. Everything else is shared in [`crate::relay`].

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use std::fmt;

use crate::config::{GEMINI_API_KEY_VAR, OPENAI_API_KEY_VAR};

pub const GEMINI_MODEL: &str = "gemini-2.5-flash-preview-05-20";
pub const OPENAI_MODEL: &str = "gpt-4o-mini";
pub const OPENAI_TEMPERATURE: f64 = 0.4;
pub const OPENAI_MAX_TOKENS: u32 = 900;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Gemini,
    OpenAi,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Gemini, Provider::OpenAi];

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenAi => "openai",
        }
    }

    /// Environment variable holding this provider's key.
    pub fn credential_var(&self) -> &'static str {
        match self {
            Provider::Gemini => GEMINI_API_KEY_VAR,
            Provider::OpenAi => OPENAI_API_KEY_VAR,
        }
    }

    /// Inbound route served for this provider.
    pub fn route(&self) -> &'static str {
        match self {
            Provider::Gemini => "/api/gemini",
            Provider::OpenAi => "/api/openai",
        }
    }

    /// Endpoint path appended to the configured base URL.
    pub fn endpoint_path(&self) -> String {
        match self {
            Provider::Gemini => format!("/v1beta/models/{}:generateContent", GEMINI_MODEL),
            Provider::OpenAi => "/v1/chat/completions".to_string(),
        }
    }

    /// Build the outbound request for `prompt`.
    ///
    /// Gemini takes the key as a `key` query parameter, OpenAI as a bearer token.
    pub fn build_request(
        &self,
        client: &Client,
        base_url: &str,
        api_key: &str,
        prompt: &str,
    ) -> RequestBuilder {
        let url = format!("{}{}", base_url, self.endpoint_path());
        match self {
            Provider::Gemini => client
                .post(url)
                .query(&[("key", api_key)])
                .json(&GeminiRequest::from_prompt(prompt)),
            Provider::OpenAi => client
                .post(url)
                .bearer_auth(api_key)
                .json(&ChatCompletionRequest::from_prompt(prompt)),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// WIRE TYPES
// ============================================================================

#[derive(Debug, Serialize)]
pub struct GeminiRequest<'a> {
    pub contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
pub struct GeminiContent<'a> {
    pub role: &'static str,
    pub parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct GeminiPart<'a> {
    pub text: &'a str,
}

impl<'a> GeminiRequest<'a> {
    pub fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'static str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> ChatCompletionRequest<'a> {
    pub fn from_prompt(prompt: &'a str) -> Self {
        Self {
            model: OPENAI_MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: OPENAI_TEMPERATURE,
            max_tokens: OPENAI_MAX_TOKENS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gemini_body() {
        let body = serde_json::to_value(GeminiRequest::from_prompt("hello")).unwrap();
        assert_eq!(
            body,
            json!({"contents": [{"role": "user", "parts": [{"text": "hello"}]}]})
        );
    }

    #[test]
    fn test_openai_body() {
        let body = serde_json::to_value(ChatCompletionRequest::from_prompt("hi")).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "gpt-4o-mini",
                "messages": [{"role": "user", "content": "hi"}],
                "temperature": 0.4,
                "max_tokens": 900
            })
        );
    }

    #[test]
    fn test_routes_and_vars() {
        assert_eq!(Provider::Gemini.route(), "/api/gemini");
        assert_eq!(Provider::OpenAi.route(), "/api/openai");
        assert_eq!(Provider::Gemini.credential_var(), "GEMINI_API_KEY");
        assert_eq!(Provider::OpenAi.credential_var(), "OPENAI_API_KEY");
    }

    #[test]
    fn test_gemini_request_carries_key_in_query() {
        let client = Client::new();
        let req = Provider::Gemini
            .build_request(&client, "http://localhost:1", "abc", "x")
            .build()
            .unwrap();
        assert_eq!(
            req.url().as_str(),
            "http://localhost:1/v1beta/models/gemini-2.5-flash-preview-05-20:generateContent?key=abc"
        );
        assert!(req.headers().get("authorization").is_none());
    }

    #[test]
    fn test_openai_request_carries_bearer_token() {
        let client = Client::new();
        let req = Provider::OpenAi
            .build_request(&client, "http://localhost:1", "sk-test", "x")
            .build()
            .unwrap();
        assert_eq!(req.url().as_str(), "http://localhost:1/v1/chat/completions");
        assert_eq!(req.headers()["authorization"], "Bearer sk-test");
        assert_eq!(req.headers()["content-type"], "application/json");
    }
}
