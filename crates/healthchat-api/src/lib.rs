//! # healthchat-api
//!
//! HTTP JSON transport for the health assistant backend.
//!
//! ## Features
//!
//! - **Transport trait**: one `post_json` operation shared by every front-end
//! - **Uniform failures**: `interpret_response` maps status and body to `ApiError`
//!   the same way for the native and the browser transport
//! - **Typed client**: `HealthClient` speaks the two endpoints in terms of
//!   `healthchat-types` payloads
//! - **Configuration**: base URL from the environment with a local default
//!
//! ## Example
//!
//! ```rust,no_run
//! use healthchat_api::{ApiConfig, HealthClient, HttpTransport};
//! use healthchat_types::ChatRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), healthchat_api::ApiError> {
//!     let config = ApiConfig::from_env();
//!     let client = HealthClient::new(HttpTransport::new(&config.base_url));
//!
//!     let reply = client.chat(&ChatRequest::new("Is a daily walk enough exercise?", &[])).await?;
//!     println!("{}", reply.message);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod logging;
pub mod transport;

// reqwest futures are not Send on wasm32; the browser uses its own fetch transport
#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub mod http;

// Re-export commonly used types
pub use client::HealthClient;
pub use config::{normalize_api_url, ApiConfig, API_URL_ENV, DEFAULT_API_URL};
pub use transport::{interpret_response, ApiError, Endpoint, Transport};

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub use http::HttpTransport;
