//! Action Router - decodes, dispatches and runs one action request.
//!
//! Stateless: every call resolves its own secret and makes at most one
//! upstream call. Concurrent requests share nothing mutable.

use std::sync::Arc;

use crate::domain::{ActionEnvelope, ActionRequest};
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::handler::{not_implemented_body, ActionHandler, UpstreamAction};
use crate::gateway::registry::ActionRegistry;
use crate::gateway::secrets::SecretStore;
use crate::gateway::upstream::UpstreamClient;

/// Routes named actions to their handlers.
pub struct ActionRouter {
    registry: Arc<ActionRegistry>,
    secrets: Arc<dyn SecretStore>,
    upstream: UpstreamClient,
}

impl ActionRouter {
    /// Create a new router with the given components.
    pub fn new(
        registry: Arc<ActionRegistry>,
        secrets: Arc<dyn SecretStore>,
        upstream: UpstreamClient,
    ) -> Self {
        Self {
            registry,
            secrets,
            upstream,
        }
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Decode a raw request body into an action request.
    pub fn decode(body: &[u8]) -> GatewayResult<ActionRequest> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Decode and dispatch a raw request body.
    pub async fn handle(&self, body: &[u8]) -> GatewayResult<ActionEnvelope> {
        let request = Self::decode(body)?;
        self.dispatch(request).await
    }

    /// Run the handler registered for `request.action`.
    pub async fn dispatch(&self, request: ActionRequest) -> GatewayResult<ActionEnvelope> {
        let ActionRequest { action, payload } = request;

        let handler = self
            .registry
            .get(&action)
            .ok_or_else(|| GatewayError::UnknownAction(action.clone()))?;

        match handler {
            ActionHandler::Upstream(upstream) => {
                self.call_upstream(&action, upstream, payload).await
            }
            ActionHandler::Placeholder { message } => {
                tracing::info!(action = %action, "Placeholder action answered");
                Ok(ActionEnvelope::ok(not_implemented_body(message)))
            }
        }
    }

    async fn call_upstream(
        &self,
        action: &str,
        upstream: &UpstreamAction,
        payload: serde_json::Value,
    ) -> GatewayResult<ActionEnvelope> {
        let secret = self
            .secrets
            .resolve(&upstream.secret)
            .ok_or_else(|| GatewayError::Configuration(upstream.secret.clone()))?;

        let body = upstream.shape.apply(payload);

        tracing::debug!(
            action = %action,
            method = %upstream.method,
            endpoint = %upstream.endpoint,
            "Forwarding action upstream"
        );

        let reply = self.upstream.send(upstream, &secret, &body).await?;

        tracing::info!(
            action = %action,
            upstream_status = reply.status,
            "Upstream call complete"
        );

        Ok(ActionEnvelope::new(reply.body, reply.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OpenAiConfig, ProvidersConfig};
    use crate::gateway::registry::{OPENAI_COMPLETION, SEND_SMS_PROVIDER};
    use crate::gateway::secrets::StaticSecretStore;
    use mockito::Matcher;
    use serde_json::json;
    use std::time::{Duration, Instant};

    fn make_router(base_url: &str, secrets: StaticSecretStore) -> ActionRouter {
        make_router_with_timeout(base_url, secrets, 5)
    }

    fn make_router_with_timeout(
        base_url: &str,
        secrets: StaticSecretStore,
        timeout_secs: u64,
    ) -> ActionRouter {
        let providers = ProvidersConfig {
            openai: OpenAiConfig {
                base_url: base_url.to_string(),
                ..OpenAiConfig::default()
            },
        };
        let registry = ActionRegistry::from_config(&providers).unwrap();

        ActionRouter::new(
            Arc::new(registry),
            Arc::new(secrets),
            UpstreamClient::new(timeout_secs).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_unknown_action() {
        let router = make_router("http://127.0.0.1:1", StaticSecretStore::default());

        let err = router
            .dispatch(ActionRequest::new("unknown_xyz", json!({})))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::UnknownAction(_)));
        assert!(err.to_string().contains("unknown_xyz"));
    }

    #[tokio::test]
    async fn test_placeholder_returns_not_implemented() {
        let router = make_router("http://127.0.0.1:1", StaticSecretStore::default());

        let envelope = router
            .dispatch(ActionRequest::new(SEND_SMS_PROVIDER, json!({ "to": "+15550100" })))
            .await
            .unwrap();

        assert_eq!(envelope.status, 200);
        assert_eq!(envelope.data["message"], "Not implemented yet");
        assert_eq!(envelope.data["implemented"], false);
    }

    #[tokio::test]
    async fn test_missing_secret_is_configuration_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .expect(0)
            .create_async()
            .await;

        let router = make_router(&server.url(), StaticSecretStore::default());

        let err = router
            .dispatch(ActionRequest::new(OPENAI_COMPLETION, json!({})))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Configuration(ref name) if name == "OPENAI_KEY"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_forwards_payload_with_secret() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-router-test")
            .match_body(Matcher::Json(json!({
                "model": "gpt-4",
                "messages": [{ "role": "user", "content": "hello" }]
            })))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"hi"}}]}"#)
            .expect(1)
            .create_async()
            .await;

        let router = make_router(
            &server.url(),
            StaticSecretStore::default().with("OPENAI_KEY", "sk-router-test"),
        );

        let envelope = router
            .dispatch(ActionRequest::new(
                OPENAI_COMPLETION,
                json!({
                    "model": "gpt-4",
                    "messages": [{ "role": "user", "content": "hello" }]
                }),
            ))
            .await
            .unwrap();

        assert_eq!(envelope.status, 200);
        assert_eq!(envelope.data["choices"][0]["message"]["content"], "hi");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_handle_rejects_malformed_body() {
        let router = make_router("http://127.0.0.1:1", StaticSecretStore::default());

        let bodies: [&[u8]; 4] = [b"not json", b"", b"{\"payload\":{}}", b"[1,2,3]"];
        for body in bodies {
            let err = router.handle(body).await.unwrap_err();
            assert!(
                matches!(err, GatewayError::MalformedRequest(_)),
                "body {:?} gave {:?}",
                String::from_utf8_lossy(body),
                err
            );
        }
    }

    #[tokio::test]
    async fn test_slow_upstream_does_not_block_other_actions() {
        // Upstream that accepts and never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let router = make_router_with_timeout(
            &format!("http://{}", addr),
            StaticSecretStore::default().with("OPENAI_KEY", "sk-router-test"),
            2,
        );

        let started = Instant::now();
        let slow = async {
            let result = router
                .dispatch(ActionRequest::new(OPENAI_COMPLETION, json!({})))
                .await;
            (result, started.elapsed())
        };
        let fast = async {
            let result = router
                .dispatch(ActionRequest::new(SEND_SMS_PROVIDER, json!({})))
                .await;
            (result, started.elapsed())
        };

        let ((slow_result, slow_elapsed), (fast_result, fast_elapsed)) = tokio::join!(slow, fast);

        assert_eq!(fast_result.unwrap().status, 200);
        assert!(fast_elapsed < Duration::from_secs(1), "placeholder took {:?}", fast_elapsed);

        assert!(matches!(slow_result, Err(GatewayError::Upstream(_))));
        assert!(slow_elapsed >= Duration::from_secs(1));
    }
}
