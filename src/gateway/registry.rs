//! Static action registry.
//!
//! Built once at startup and shared read-only between requests.
//! Adding an action means adding one entry in `from_config`.

use std::collections::HashMap;
use thiserror::Error;

use crate::config::ProvidersConfig;
use crate::gateway::handler::{ActionHandler, PayloadShape, UpstreamAction};

/// Chat-completion action.
pub const OPENAI_COMPLETION: &str = "openai_completion";
/// SMS provider action, not wired to a provider yet.
pub const SEND_SMS_PROVIDER: &str = "send_sms_provider";

/// Invalid registration. Fatal at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("action name must not be empty")]
    EmptyName,

    #[error("action '{0}' registered twice")]
    Duplicate(String),
}

/// Immutable mapping from action name to handler.
#[derive(Debug)]
pub struct ActionRegistry {
    handlers: HashMap<String, ActionHandler>,
}

impl ActionRegistry {
    pub fn builder() -> ActionRegistryBuilder {
        ActionRegistryBuilder::default()
    }

    /// Registry with the built-in actions.
    pub fn from_config(providers: &ProvidersConfig) -> Result<Self, RegistryError> {
        let openai = &providers.openai;
        let shape = if openai.defaults.is_empty() {
            PayloadShape::Passthrough
        } else {
            PayloadShape::WithDefaults(openai.defaults.clone())
        };

        let completion = UpstreamAction::post(
            format!(
                "{}/v1/chat/completions",
                openai.base_url.trim_end_matches('/')
            ),
            openai.secret.clone(),
        )
        .with_shape(shape);

        Self::builder()
            .register(OPENAI_COMPLETION, ActionHandler::Upstream(completion))
            .register(
                SEND_SMS_PROVIDER,
                ActionHandler::placeholder("Not implemented yet"),
            )
            .build()
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, action: &str) -> Option<&ActionHandler> {
        self.handlers.get(action)
    }

    /// Registered action names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Collects registrations and validates them on `build`.
#[derive(Debug, Default)]
pub struct ActionRegistryBuilder {
    entries: Vec<(String, ActionHandler)>,
}

impl ActionRegistryBuilder {
    pub fn register(mut self, action: impl Into<String>, handler: ActionHandler) -> Self {
        self.entries.push((action.into(), handler));
        self
    }

    pub fn build(self) -> Result<ActionRegistry, RegistryError> {
        let mut handlers = HashMap::with_capacity(self.entries.len());

        for (name, handler) in self.entries {
            if name.trim().is_empty() {
                return Err(RegistryError::EmptyName);
            }
            if handlers.contains_key(&name) {
                return Err(RegistryError::Duplicate(name));
            }
            handlers.insert(name, handler);
        }

        Ok(ActionRegistry { handlers })
    }
}
