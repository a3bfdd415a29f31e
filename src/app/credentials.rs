//! Credentials
//!
//! Read once from the environment, checked before any crew work starts,
//! then handed to the clients that need them.

use super::config::ConfigError;
use crewline_llm::ProviderKind;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Environment variable holding the Serper key
pub const SERPER_KEY_VAR: &str = "SERPER_API_KEY";

/// API keys for one run
#[derive(Clone)]
pub struct Credentials {
    /// Provider the LLM key belongs to
    pub provider: ProviderKind,
    /// LLM API key
    pub llm_key: SecretString,
    /// Serper API key
    pub serper_key: SecretString,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("provider", &self.provider)
            .field(
                "llm_key",
                &crewline_llm::util::mask_api_key(self.llm_key.expose_secret()),
            )
            .field("serper_key", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Load from the process environment
    pub fn from_env(provider: ProviderKind) -> Result<Self, ConfigError> {
        Self::from_lookup(provider, |var| std::env::var(var).ok())
    }

    /// Load through `lookup`; blank values count as missing
    ///
    /// Every missing variable is reported, not just the first.
    pub fn from_lookup(
        provider: ProviderKind,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let read = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let llm_key = read(provider.key_var());
        let serper_key = read(SERPER_KEY_VAR);

        match (llm_key, serper_key) {
            (Some(llm_key), Some(serper_key)) => Ok(Self {
                provider,
                llm_key: SecretString::from(llm_key),
                serper_key: SecretString::from(serper_key),
            }),
            (llm_key, serper_key) => {
                let mut missing = Vec::new();
                if llm_key.is_none() {
                    missing.push(provider.key_var().to_string());
                }
                if serper_key.is_none() {
                    missing.push(SERPER_KEY_VAR.to_string());
                }
                Err(ConfigError::MissingCredentials(missing))
            }
        }
    }
}

/// Whether each required variable is set, for status output
pub fn credential_status(
    provider: ProviderKind,
    lookup: impl Fn(&str) -> Option<String>,
) -> Vec<(&'static str, bool)> {
    [provider.key_var(), SERPER_KEY_VAR]
        .into_iter()
        .map(|var| (var, lookup(var).is_some_and(|v| !v.trim().is_empty())))
        .collect()
}
