//! Global configuration types for Lingo.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls the
//! model backend and session defaults.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Lingo backend.
///
/// Loaded from `~/.lingo/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Settings for the OpenAI-compatible model backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL including the API version segment (e.g. `http://localhost:8081/v1`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Upper bound on one model call. `0` disables the bound.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_base_url() -> String {
    "http://localhost:8081/v1".to_string()
}

fn default_model() -> String {
    "local-model".to_string()
}

fn default_max_tokens() -> u32 {
    512
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_api_key_env() -> String {
    "LINGO_LLM_API_KEY".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Defaults for sessions opened through the operator CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_ttl_hours")]
    pub default_ttl_hours: i64,
}

fn default_ttl_hours() -> i64 {
    24
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_ttl_hours: default_ttl_hours(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_default_values() {
        let config = GlobalConfig::default();
        assert_eq!(config.llm.base_url, "http://localhost:8081/v1");
        assert_eq!(config.llm.max_tokens, 512);
        assert_eq!(config.llm.timeout_secs, 120);
        assert_eq!(config.session.default_ttl_hours, 24);
    }

    #[test]
    fn test_global_config_deserialize_with_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config.llm.model, "local-model");
        assert_eq!(config.llm.api_key_env, "LINGO_LLM_API_KEY");
    }

    #[test]
    fn test_global_config_deserialize_partial_section() {
        let toml_str = r#"
[llm]
base_url = "https://api.openai.com/v1"
model = "gpt-4o-mini"
timeout_secs = 30

[session]
default_ttl_hours = 72
"#;
        let config: GlobalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.timeout_secs, 30);
        // Unspecified fields keep their defaults
        assert_eq!(config.llm.max_tokens, 512);
        assert_eq!(config.session.default_ttl_hours, 72);
    }
}
