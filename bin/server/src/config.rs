//! Centralized server configuration.
//!
//! Loaded via the `config` crate from environment variables, with `__`
//! separating nested keys (`LLM__MODEL` sets `llm.model`).

use neurochat_ai::{DEFAULT_MODEL, DEFAULT_TEMPERATURE, LlmBackendConfig};
use serde::Deserialize;

/// Server configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Credential for the completion provider.
    pub openai_api_key: String,

    /// Completion provider settings.
    #[serde(default)]
    pub llm: LlmSettings,
}

/// Completion provider settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    /// Provider base URL, without the `/v1/...` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// HTTP client timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_timeout_secs() -> u64 {
    LlmBackendConfig::DEFAULT_TIMEOUT_SECS
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(config::Environment::default())
    }

    fn from_environment(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(environment.separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Backend configuration for the OpenAI-compatible client.
    #[must_use]
    pub fn backend_config(&self) -> LlmBackendConfig {
        let mut backend = LlmBackendConfig::openai(&self.openai_api_key, &self.llm.model)
            .with_timeout_secs(self.llm.timeout_secs);
        backend.base_url = self.llm.base_url.clone();
        backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, config::ConfigError> {
        let source = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_environment(config::Environment::default().source(Some(source)))
    }

    #[test]
    fn llm_settings_have_correct_defaults() {
        let settings = LlmSettings::default();
        assert_eq!(settings.base_url, "https://api.openai.com");
        assert_eq!(settings.model, "gpt-4o-mini");
        assert!((settings.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(settings.timeout_secs, 60);
    }

    #[test]
    fn api_key_is_required() {
        assert!(load(&[]).is_err());
    }

    #[test]
    fn nested_keys_override_defaults() {
        let config = load(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("LLM__MODEL", "gpt-4o"),
            ("LLM__TIMEOUT_SECS", "5"),
        ])
        .expect("valid configuration");

        assert_eq!(config.openai_api_key, "sk-test");
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.timeout_secs, 5);
        assert_eq!(config.llm.base_url, "https://api.openai.com");
    }

    #[test]
    fn backend_config_follows_settings() {
        let config = load(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("LLM__BASE_URL", "http://localhost:11434"),
        ])
        .expect("valid configuration");

        let backend = config.backend_config();
        assert_eq!(backend.base_url, "http://localhost:11434");
        assert_eq!(backend.api_key.as_deref(), Some("sk-test"));
        assert_eq!(backend.model, "gpt-4o-mini");
    }
}
