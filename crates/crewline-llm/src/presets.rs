//! Provider presets
//!
//! Every supported backend exposes an OpenAI-compatible `/chat/completions`
//! endpoint, so a preset is just a base URL, a default model and the name of
//! the environment variable holding its credential.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported LLM backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI
    #[serde(rename = "openai")]
    OpenAi,
    /// Mistral AI
    Mistral,
    /// Cohere (compatibility API)
    Cohere,
    /// HuggingFace inference router
    #[serde(rename = "huggingface")]
    HuggingFace,
}

impl ProviderKind {
    /// All presets, in display order
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::OpenAi,
        ProviderKind::Mistral,
        ProviderKind::Cohere,
        ProviderKind::HuggingFace,
    ];

    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Mistral => "mistral",
            Self::Cohere => "cohere",
            Self::HuggingFace => "huggingface",
        }
    }

    /// Base URL of the chat completions API
    #[must_use]
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Mistral => "https://api.mistral.ai/v1",
            Self::Cohere => "https://api.cohere.ai/compatibility/v1",
            Self::HuggingFace => "https://router.huggingface.co/v1",
        }
    }

    /// Model used when the configuration names none
    #[must_use]
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4-turbo",
            Self::Mistral => "mistral-small",
            Self::Cohere => "command-r",
            Self::HuggingFace => "HuggingFaceH4/zephyr-7b-beta",
        }
    }

    /// Environment variable that carries the credential
    #[must_use]
    pub fn key_var(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Mistral => "MISTRAL_API_KEY",
            Self::Cohere => "COHERE_API_KEY",
            Self::HuggingFace => "HUGGINGFACE_API_TOKEN",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower)
            .ok_or_else(|| Error::UnknownProvider(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider() {
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!(" Mistral ".parse::<ProviderKind>().unwrap(), ProviderKind::Mistral);
        assert!(matches!(
            "palm".parse::<ProviderKind>(),
            Err(Error::UnknownProvider(_))
        ));
    }

    #[test]
    fn test_mistral_preset() {
        let kind = ProviderKind::Mistral;
        assert_eq!(kind.base_url(), "https://api.mistral.ai/v1");
        assert_eq!(kind.default_model(), "mistral-small");
        assert_eq!(kind.key_var(), "MISTRAL_API_KEY");
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for kind in ProviderKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
