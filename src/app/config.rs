//! Application configuration types

use crewline_core::EngineConfig;
use crewline_llm::ProviderKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration rejected after loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field holds an unusable value
    #[error("invalid configuration: {field}: {message}")]
    Invalid {
        /// Config field name
        field: &'static str,
        /// Detailed message
        message: String,
    },

    /// Credentials missing from the environment
    #[error("missing credentials: {} (set them in the environment or .env)", .0.join(", "))]
    MissingCredentials(Vec<String>),
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// `[llm]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Empty uses the provider preset's model
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: usize,
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_max_tool_rounds() -> usize {
    5
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: String::new(),
            base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_tool_rounds: default_max_tool_rounds(),
        }
    }
}

impl LlmSettings {
    /// Parsed provider preset
    pub fn provider_kind(&self) -> Result<ProviderKind, ConfigError> {
        self.provider.parse().map_err(|e: crewline_llm::Error| ConfigError::Invalid {
            field: "llm.provider",
            message: e.to_string(),
        })
    }

    /// Model to request, falling back to the preset default
    pub fn effective_model(&self) -> Result<String, ConfigError> {
        if self.model.trim().is_empty() {
            Ok(self.provider_kind()?.default_model().to_string())
        } else {
            Ok(self.model.trim().to_string())
        }
    }

    /// Engine parameters
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        Ok(EngineConfig {
            model: self.effective_model()?,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            max_tool_rounds: self.max_tool_rounds,
        })
    }
}

/// `[search]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_search_base_url")]
    pub base_url: String,
    #[serde(default = "default_result_count")]
    pub result_count: u32,
}

fn default_search_base_url() -> String {
    crewline_tools::search::SERPER_API_BASE.to_string()
}

fn default_result_count() -> u32 {
    crewline_tools::search::DEFAULT_RESULT_COUNT
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            base_url: default_search_base_url(),
            result_count: default_result_count(),
        }
    }
}

/// `[app]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// 0 = warnings, 1 = progress, 2 = every step
    #[serde(default = "default_verbose")]
    pub verbose: u8,
    #[serde(default)]
    pub debug: bool,
}

fn default_verbose() -> u8 {
    2
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            verbose: default_verbose(),
            debug: false,
        }
    }
}

impl AppSettings {
    /// Log level for crewline targets
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            return "debug";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Default `EnvFilter` directives when `RUST_LOG` is unset
    pub fn default_filter(&self) -> String {
        let level = self.log_level();
        ["crewline", "crewline_core", "crewline_tools", "crewline_llm"]
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// `[logging]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Directory for a daily-rolling log file
    #[serde(default)]
    pub directory: Option<String>,
}

impl AppConfig {
    /// Reject values that cannot work
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.llm.provider_kind()?;

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::Invalid {
                field: "llm.temperature",
                message: format!("{} is outside 0.0..=2.0", self.llm.temperature),
            });
        }
        if self.llm.max_tokens == 0 {
            return Err(ConfigError::Invalid {
                field: "llm.max_tokens",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.search.result_count == 0 {
            return Err(ConfigError::Invalid {
                field: "search.result_count",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.app.verbose > 2 {
            return Err(ConfigError::Invalid {
                field: "app.verbose",
                message: format!("{} is not one of 0, 1, 2", self.app.verbose),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.llm.effective_model().unwrap(), "gpt-4-turbo");
        assert_eq!(config.llm.engine_config().unwrap().max_tokens, 1500);
    }

    #[test]
    fn test_verbose_levels() {
        let mut app = AppSettings::default();
        assert_eq!(app.log_level(), "debug");
        app.verbose = 1;
        assert_eq!(app.log_level(), "info");
        app.verbose = 0;
        assert_eq!(app.log_level(), "warn");
        assert!(app.default_filter().starts_with("crewline=warn,"));
        app.debug = true;
        assert_eq!(app.log_level(), "debug");
    }

    #[test]
    fn test_invalid_values() {
        let mut config = AppConfig::default();
        config.llm.provider = "palm".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "llm.provider", .. })
        ));

        let mut config = AppConfig::default();
        config.llm.temperature = 3.5;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.app.verbose = 7;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_model_wins() {
        let llm = LlmSettings {
            provider: "mistral".to_string(),
            model: "mistral-large-latest".to_string(),
            ..LlmSettings::default()
        };
        assert_eq!(llm.effective_model().unwrap(), "mistral-large-latest");
    }
}
