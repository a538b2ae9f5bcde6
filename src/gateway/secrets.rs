//! Named secret resolution.
//!
//! Secrets are looked up by name on every dispatch and dropped afterwards.
//! Nothing here caches a value.

use secrecy::SecretString;

/// Source of named secrets.
pub trait SecretStore: Send + Sync {
    /// Resolve a secret by name. `None` means not provisioned.
    fn resolve(&self, name: &str) -> Option<SecretString>;
}

/// Reads secrets from the process environment at call time.
///
/// An empty variable counts as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecretStore;

impl SecretStore for EnvSecretStore {
    fn resolve(&self, name: &str) -> Option<SecretString> {
        std::env::var(name)
            .ok()
            .filter(|value| !value.is_empty())
            .map(SecretString::new)
    }
}

/// Fixed in-memory secrets.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct StaticSecretStore {
    secrets: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl StaticSecretStore {
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.secrets.insert(name.to_string(), value.to_string());
        self
    }
}

#[cfg(test)]
impl SecretStore for StaticSecretStore {
    fn resolve(&self, name: &str) -> Option<SecretString> {
        self.secrets
            .get(name)
            .filter(|value| !value.is_empty())
            .map(|value| SecretString::new(value.clone()))
    }
}
