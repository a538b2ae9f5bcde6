//! Configuration module for the action gateway.
//!
//! Loads configuration from YAML files and environment variables. Upstream
//! credentials are NOT part of this configuration: only the *names* of the
//! secrets live here, the values are resolved per request by the secret store.

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub providers: ProvidersConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Outbound HTTP client configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Upper bound for a single upstream call, in seconds.
    pub timeout_secs: u64,
}

/// Per-provider settings for the built-in actions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub openai: OpenAiConfig,
}

/// Chat-completion provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// Scheme and host of the API, without trailing path.
    pub base_url: String,
    /// Name of the environment secret holding the API key.
    pub secret: String,
    /// Top-level fields filled into the payload when the client omits them.
    pub defaults: Map<String, Value>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            secret: "OPENAI_KEY".to_string(),
            defaults: Map::new(),
        }
    }
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (GATEWAY__*)
    /// 2. config/local.yaml (if exists)
    /// 3. config/default.yaml (if exists)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("GATEWAY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make every request fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "upstream.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(config.providers.openai.secret, "OPENAI_KEY");
        assert_eq!(config.providers.openai.base_url, "https://api.openai.com");
        assert!(config.providers.openai.defaults.is_empty());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let loaded = ConfigLoader::builder()
            .add_source(File::from_str(
                "providers:\n  openai:\n    defaults:\n      model: gpt-4o-mini\n",
                config::FileFormat::Yaml,
            ))
            .build()
            .unwrap();

        let config: Config = loaded.try_deserialize().unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.providers.openai.secret, "OPENAI_KEY");
        assert_eq!(
            config.providers.openai.defaults.get("model"),
            Some(&Value::String("gpt-4o-mini".to_string()))
        );
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.upstream.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }
}
