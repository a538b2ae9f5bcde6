//! Outbound HTTP calls to third-party APIs.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Duration;

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::handler::UpstreamAction;

/// Status and JSON body of an upstream response, kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

/// Shared HTTP client for all upstream actions.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
}

impl UpstreamClient {
    /// Create a client whose calls give up after `timeout_secs`.
    pub fn new(timeout_secs: u64) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("action-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Perform the single outbound call for an action.
    ///
    /// Any HTTP status is returned as-is; only transport failures and
    /// non-JSON bodies are errors.
    pub async fn send(
        &self,
        action: &UpstreamAction,
        secret: &SecretString,
        body: &Value,
    ) -> GatewayResult<UpstreamReply> {
        let response = self
            .client
            .request(action.method.clone(), &action.endpoint)
            .bearer_auth(secret.expose_secret())
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        let body = serde_json::from_slice(&bytes).map_err(|e| {
            GatewayError::Upstream(format!(
                "invalid JSON in response (status {}): {}",
                status, e
            ))
        })?;

        Ok(UpstreamReply { status, body })
    }
}
