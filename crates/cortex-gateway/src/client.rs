//! HTTP gateway client.
//!
//! Builds authenticated requests against the Cortex API and normalizes
//! failures into the shared error taxonomy: a non-2xx response becomes
//! `CortexError::Api` carrying the server-supplied message when the body
//! has one, and a transport failure becomes `CortexError::Network`.
//! Requests are never retried here; retry policy belongs to callers.

use cortex_core::error::{CortexError, Result};
use reqwest::{Client, Method, StatusCode, header};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::config::GatewayConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const GENERIC_FAILURE: &str = "API request failed";

/// Shared handle to the session's bearer token.
///
/// Created once at application start and handed to both the gateway and the
/// session lifecycle, which sets it on login and clears it on logout. This
/// replaces the ambient module-level token the original client kept.
#[derive(Clone, Default)]
pub struct AuthToken {
    inner: Arc<RwLock<Option<String>>>,
}

impl AuthToken {
    /// Creates an empty token handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a token after successful authentication.
    pub async fn set(&self, token: impl Into<String>) {
        *self.inner.write().await = Some(token.into());
    }

    /// Clears the token on logout or credential rejection.
    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }

    /// The current token, if one is held.
    pub async fn get(&self) -> Option<String> {
        self.inner.read().await.clone()
    }
}

/// Client for the Cortex HTTP API.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    auth: AuthToken,
}

impl HttpGateway {
    /// Creates a gateway for the configured origin.
    pub fn new(config: &GatewayConfig, auth: AuthToken) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth,
        }
    }

    /// Sends a request and returns the decoded JSON body.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Path relative to the configured origin (e.g. `/notes`)
    /// * `method` - HTTP method
    /// * `body` - Optional JSON body
    /// * `auth_required` - Attach the bearer header (when a token is held)
    pub async fn send(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&serde_json::Value>,
        auth_required: bool,
    ) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.dispatch(request, endpoint, auth_required).await
    }

    /// Sends a request with URL-encoded query pairs.
    ///
    /// Encoding is reqwest's; callers pass the raw values.
    pub async fn send_with_query(
        &self,
        endpoint: &str,
        method: Method,
        query: &[(&str, &str)],
        auth_required: bool,
    ) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        let request = self.client.request(method, &url).query(query);
        self.dispatch(request, endpoint, auth_required).await
    }

    async fn dispatch(
        &self,
        mut request: reqwest::RequestBuilder,
        endpoint: &str,
        auth_required: bool,
    ) -> Result<serde_json::Value> {
        if auth_required {
            if let Some(token) = self.auth.get().await {
                request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
        }

        let response = request.send().await.map_err(|err| {
            tracing::debug!(target: "gateway", endpoint, error = %err, "transport failure");
            CortexError::network("network error")
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|_| CortexError::network("network error"))?;

        if !status.is_success() {
            return Err(map_http_error(status, &text));
        }

        serde_json::from_str(&text).map_err(CortexError::from)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Extracts the server message from a non-2xx body, with a generic fallback.
fn map_http_error(status: StatusCode, body: &str) -> CortexError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|wrapper| wrapper.message)
        .unwrap_or_else(|_| GENERIC_FAILURE.to_string());
    CortexError::api(status.as_u16(), message)
}
