//! Prompt Relay
//!
//! Thin HTTP relay that forwards a client prompt to Gemini or OpenAI and
//! returns the provider's JSON response unchanged.
//!
//! ## Module Structure
//!
//! - `config`: Credentials and runtime configuration
//! - `provider`: Per-provider endpoint, credential placement and request body
//! - `relay`: Outbound call and error wrapping shared by both providers
//! - `error`: Relay errors and their HTTP status mapping
//! - `server`: axum routes and server startup

pub mod config;
pub mod error;
pub mod provider;
pub mod relay;
pub mod server;

pub use config::{Credentials, RelayConfig};
pub use error::RelayError;
pub use provider::Provider;
pub use relay::{ProviderReply, Relay};
pub use server::{router, run_server, PromptRequest};
