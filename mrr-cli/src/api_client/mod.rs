//! API client library.
//!
//! This module provides a Rust client for the MiningRigRentals REST API,
//! used by the interactive shell. [`ApiClient::send`] is the single path
//! every request takes: sign the endpoint, attach the auth headers, issue
//! the call on the shared connection pool, and normalize the response.
//!
//! # Response handling
//!
//! - Status 200: the body is decoded as JSON and returned unchanged.
//! - Any other status: `Error::Api` with the body's `message` field, or
//!   `"Failed to process request"` if the body has none.
//! - Network failures are not normalized and surface as
//!   `Error::Transport`.

mod endpoints;
pub mod types;

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use crate::auth::Signer;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::tracing::prelude::*;

pub use types::{ApiRequest, Method, PathParam, Query};

/// Client identifier sent with every request.
pub const USER_AGENT: &str = "Raccoon MRR CLI";

/// Message used when an error response carries no usable `message`.
pub const FALLBACK_ERROR: &str = "Failed to process request";

/// Authenticated client for one API base URL.
///
/// Holds a single `reqwest::Client`, so connections are pooled and reused
/// for the whole session.
#[derive(Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    signer: Signer,
}

impl ApiClient {
    /// Create a client from validated configuration.
    ///
    /// # Errors
    /// Returns `Error::Transport` if the HTTP client cannot be built (e.g.
    /// the TLS backend fails to initialize).
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            signer: Signer::new(config.credentials.clone()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform one authenticated request and normalize the result.
    pub async fn send(&self, request: &ApiRequest) -> Result<Value> {
        let url = self.url(&request.endpoint);
        let auth = self.signer.sign(&request.endpoint);

        debug!(
            method = %request.method,
            endpoint = %request.endpoint,
            nonce = %auth.nonce,
            "Sending request"
        );

        let mut builder = self.http.request(request.method.into(), &url);
        for (name, value) in auth.pairs() {
            builder = builder.header(name, value);
        }
        if let Some(query) = &request.query {
            builder = builder.query(query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        normalize(response).await
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

async fn normalize(response: Response) -> Result<Value> {
    let status = response.status();
    let body = response.bytes().await?;

    if status == StatusCode::OK {
        return Ok(serde_json::from_slice(&body)?);
    }

    let message = error_message(&body);
    warn!(status = status.as_u16(), message = %message, "Request failed");
    Err(Error::Api(message))
}

/// Extract the human-readable message from an error response body.
///
/// Looks for a top-level `message`, then the `data.message` used by the
/// MRR error envelope. Falls back to [`FALLBACK_ERROR`].
pub fn error_message(body: &[u8]) -> String {
    let Ok(json) = serde_json::from_slice::<Value>(body) else {
        return FALLBACK_ERROR.to_string();
    };

    json.get("message")
        .or_else(|| json.get("data").and_then(|data| data.get("message")))
        .and_then(message_text)
        .unwrap_or_else(|| FALLBACK_ERROR.to_string())
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
