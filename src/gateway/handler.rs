//! Action handler definitions.
//!
//! A handler is plain data: where to send the payload, which secret to
//! attach, and how to shape the body. The router interprets it.

use reqwest::Method;
use serde_json::{json, Map, Value};

/// How the client payload is turned into the upstream request body.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadShape {
    /// Forward the payload unchanged.
    Passthrough,
    /// Fill top-level keys the client left out. Client values always win.
    WithDefaults(Map<String, Value>),
}

impl PayloadShape {
    /// Build the outbound body from the client payload.
    pub fn apply(&self, payload: Value) -> Value {
        match self {
            PayloadShape::Passthrough => payload,
            PayloadShape::WithDefaults(defaults) => match payload {
                Value::Object(mut fields) => {
                    for (key, value) in defaults {
                        fields.entry(key.clone()).or_insert_with(|| value.clone());
                    }
                    Value::Object(fields)
                }
                // Non-object payloads have no keys to fill.
                other => other,
            },
        }
    }
}

/// An action backed by exactly one upstream HTTP call.
#[derive(Debug, Clone)]
pub struct UpstreamAction {
    pub method: Method,
    pub endpoint: String,
    /// Name of the secret sent as `Authorization: Bearer <secret>`.
    pub secret: String,
    pub shape: PayloadShape,
}

impl UpstreamAction {
    /// A JSON POST endpoint with a passthrough body.
    pub fn post(endpoint: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            endpoint: endpoint.into(),
            secret: secret.into(),
            shape: PayloadShape::Passthrough,
        }
    }

    pub fn with_shape(mut self, shape: PayloadShape) -> Self {
        self.shape = shape;
        self
    }
}

/// Handler bound to one action name.
#[derive(Debug, Clone)]
pub enum ActionHandler {
    Upstream(UpstreamAction),
    /// Known action without an integration yet. Answers with a success
    /// envelope so clients can tell it apart from an unknown action.
    Placeholder { message: String },
}

impl ActionHandler {
    pub fn placeholder(message: impl Into<String>) -> Self {
        ActionHandler::Placeholder {
            message: message.into(),
        }
    }

    /// Secret names this handler needs at call time.
    pub fn required_secret(&self) -> Option<&str> {
        match self {
            ActionHandler::Upstream(upstream) => Some(&upstream.secret),
            ActionHandler::Placeholder { .. } => None,
        }
    }
}

/// Body returned by placeholder actions.
pub fn not_implemented_body(message: &str) -> Value {
    json!({
        "message": message,
        "implemented": false,
    })
}
