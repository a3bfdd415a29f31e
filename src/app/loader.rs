//! Configuration loading
//!
//! Embedded defaults, then optional files, then `CREWLINE_` environment
//! variables (`CREWLINE_LLM__PROVIDER=mistral`).

use super::config::AppConfig;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use std::collections::HashMap;

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "CREWLINE";

/// Load configuration from files and the process environment
pub fn load_config() -> Result<AppConfig> {
    load_config_from("config/local", None)
}

/// Load configuration with an explicit local override file
///
/// `env` replaces the process environment when given.
pub fn load_config_from(local: &str, env: Option<HashMap<String, String>>) -> Result<AppConfig> {
    let config = Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        .add_source(File::with_name(local).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()
        .context("Failed to build configuration")?;

    let app: AppConfig = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;
    app.validate()?;
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env() -> Option<HashMap<String, String>> {
        Some(HashMap::new())
    }

    #[test]
    fn test_embedded_defaults() {
        let config = load_config_from("does/not/exist", no_env()).unwrap();
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.temperature, 0.7);
        assert_eq!(config.llm.max_tokens, 1500);
        assert_eq!(config.app.verbose, 2);
        assert_eq!(config.search.result_count, 10);
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let env = HashMap::from([
            ("CREWLINE_LLM__PROVIDER".to_string(), "mistral".to_string()),
            ("CREWLINE_APP__VERBOSE".to_string(), "1".to_string()),
        ]);
        let config = load_config_from("does/not/exist", Some(env)).unwrap();
        assert_eq!(config.llm.provider, "mistral");
        assert_eq!(config.llm.effective_model().unwrap(), "mistral-small");
        assert_eq!(config.app.verbose, 1);
    }

    #[test]
    fn test_local_file_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local.toml");
        std::fs::write(&path, "[llm]\nmax_tokens = 800\n[logging]\ndirectory = \"logs\"\n").unwrap();

        let config = load_config_from(path.to_str().unwrap(), no_env()).unwrap();
        assert_eq!(config.llm.max_tokens, 800);
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.logging.directory.as_deref(), Some("logs"));
    }

    #[test]
    fn test_invalid_provider_rejected() {
        let env = HashMap::from([("CREWLINE_LLM__PROVIDER".to_string(), "palm".to_string())]);
        assert!(load_config_from("does/not/exist", Some(env)).is_err());
    }
}
