//! Inbound action request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A client request naming an action and its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActionRequest {
    /// Registered action name, matched exactly.
    pub action: String,

    /// Forwarded to the upstream API. Defaults to `{}` when omitted.
    #[serde(default = "empty_object")]
    #[schema(value_type = Object)]
    pub payload: Value,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl ActionRequest {
    pub fn new(action: impl Into<String>, payload: Value) -> Self {
        Self {
            action: action.into(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_defaults_to_empty_object() {
        let request: ActionRequest =
            serde_json::from_value(json!({ "action": "send_sms_provider" })).unwrap();
        assert_eq!(request.payload, json!({}));
    }

    #[test]
    fn test_missing_action_is_rejected() {
        let result = serde_json::from_value::<ActionRequest>(json!({ "payload": {} }));
        assert!(result.unwrap_err().to_string().contains("action"));
    }

    #[test]
    fn test_non_string_action_is_rejected() {
        assert!(serde_json::from_value::<ActionRequest>(json!({ "action": 7 })).is_err());
        assert!(serde_json::from_value::<ActionRequest>(json!({ "action": null })).is_err());
    }
}
