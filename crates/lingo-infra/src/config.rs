//! Global configuration loader for Lingo.
//!
//! Reads `config.toml` from the data directory (`~/.lingo/` in production)
//! and deserializes it into [`GlobalConfig`]. Falls back to sensible defaults
//! when the file is missing or malformed.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use lingo_types::config::{GlobalConfig, LlmConfig};

/// Resolve the data directory.
///
/// Priority: `LINGO_DATA_DIR`, then `~/.lingo`, then `./.lingo`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("LINGO_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".lingo");
    }

    PathBuf::from(".lingo")
}

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Read the model API key from the environment variable named in the config.
///
/// Returns `None` when unset or empty; local backends commonly need no key.
pub fn resolve_api_key(llm: &LlmConfig) -> Option<SecretString> {
    std::env::var(&llm.api_key_env)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(SecretString::from)
}
