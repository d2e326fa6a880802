//! HTTP API Client
//!
//! Typed bindings to the external auth and task services, organized by domain.
//! Every operation returns [`ApiResult`]; screens never look at raw responses.

mod auth;
mod cache;
mod tasks;

#[cfg(test)]
pub(crate) mod fake;

use std::sync::{Arc, Mutex};

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ApiConfig;

// Re-export all public items
pub use cache::{CacheTag, QueryCache};
pub use auth::registration_error_message;
pub use tasks::TaskGateway;

/// Uniform result of every API operation
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a request, as seen by the client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server responded with status {status}")]
    Server { status: u16, message: Option<String> },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status for server-reported failures
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message provided by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message: Some(m), .. } if !m.trim().is_empty() => Some(m),
            _ => None,
        }
    }

    /// Text shown to the user: the server's message verbatim, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

/// `{ status, message, data? }` response body
///
/// The user endpoint nests its payload under `user` instead of `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub status: Option<String>,
    pub message: Option<String>,
    #[serde(alias = "user")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    fn empty() -> Self {
        Self { status: None, message: None, data: None }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Acknowledgement of a mutation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ack {
    pub message: Option<String>,
}

impl Ack {
    pub fn message_or(&self, fallback: &str) -> String {
        match self.message.as_deref() {
            Some(m) if !m.trim().is_empty() => m.to_string(),
            _ => fallback.to_string(),
        }
    }
}

impl<T> From<Envelope<T>> for Ack {
    fn from(envelope: Envelope<T>) -> Self {
        Ack { message: envelope.message }
    }
}

/// Turn an HTTP status and body into an envelope or an [`ApiError`].
///
/// Non-2xx bodies contribute their `message`; a 2xx body whose `status`
/// is `"failed"` is also a failure.
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<Envelope<T>> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message);
        return Err(ApiError::Server { status, message });
    }

    let envelope: Envelope<T> = if body.trim().is_empty() {
        Envelope::empty()
    } else {
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?
    };

    if envelope.status.as_deref() == Some("failed") {
        return Err(ApiError::Server { status, message: envelope.message });
    }
    Ok(envelope)
}

/// Encode a single path segment (task ids, reset tokens)
pub(crate) fn path_segment(raw: &str) -> String {
    utf8_percent_encode(raw, NON_ALPHANUMERIC).to_string()
}

/// Shared HTTP client with the per-session query cache
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: reqwest::Client,
    cache: Arc<Mutex<QueryCache>>,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            cache: Arc::new(Mutex::new(QueryCache::default())),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Drop cached results for `tag`
    pub fn invalidate(&self, tag: CacheTag) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.invalidate(tag);
        }
    }

    /// Drop every cached result (logout)
    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }

    fn with_cache<R>(&self, f: impl FnOnce(&mut QueryCache) -> R) -> Option<R> {
        self.cache.lock().ok().map(|mut cache| f(&mut cache))
    }

    /// Send a request with browser credentials and decode the envelope
    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> ApiResult<Envelope<T>> {
        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let result = decode_envelope(status, &body);
        if let Err(err) = &result {
            tracing::warn!(status, error = %err, "[API] request failed");
        }
        result
    }
}
