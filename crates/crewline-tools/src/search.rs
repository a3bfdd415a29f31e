//! Web search client
//!
//! Tools never talk to a search engine directly; they go through
//! [`SearchClient`], so tests can substitute a recording fake. The
//! production client calls the Serper Google Search API.

use crate::error::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::fmt;
use tracing::{debug, instrument};

/// Default Serper API endpoint
pub const SERPER_API_BASE: &str = "https://google.serper.dev";

/// Default number of organic results requested
pub const DEFAULT_RESULT_COUNT: u32 = 10;

/// A text search backend
#[async_trait::async_trait]
pub trait SearchClient: Send + Sync {
    /// Run one query and return human-readable results
    async fn search(&self, query: &str) -> Result<String>;
}

/// Serper client configuration
#[derive(Clone)]
pub struct SerperConfig {
    /// API key
    pub api_key: SecretString,
    /// API base URL
    pub base_url: String,
    /// Organic results per query
    pub result_count: u32,
}

impl fmt::Debug for SerperConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerperConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("result_count", &self.result_count)
            .finish()
    }
}

impl SerperConfig {
    /// Create a configuration with the default endpoint
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            base_url: SERPER_API_BASE.to_string(),
            result_count: DEFAULT_RESULT_COUNT,
        }
    }

    /// Set the API base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the number of organic results
    #[must_use]
    pub fn with_result_count(mut self, count: u32) -> Self {
        self.result_count = count;
        self
    }
}

/// Serper (google.serper.dev) search client
pub struct SerperClient {
    client: reqwest::Client,
    config: SerperConfig,
}

#[derive(Debug, Default, Deserialize)]
struct SerperResponse {
    #[serde(default, rename = "answerBox")]
    answer_box: Option<AnswerBox>,
    #[serde(default, rename = "knowledgeGraph")]
    knowledge_graph: Option<KnowledgeGraph>,
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct AnswerBox {
    answer: Option<String>,
    snippet: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KnowledgeGraph {
    title: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

impl SerperClient {
    /// Create a new client
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: SerperConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::NotConfigured(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }
}

#[async_trait::async_trait]
impl SearchClient for SerperClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<String> {
        debug!("Sending Serper search request");

        let response = self
            .client
            .post(format!("{}/search", self.config.base_url))
            .header("X-API-KEY", self.config.api_key.expose_secret())
            .json(&serde_json::json!({
                "q": query,
                "num": self.config.result_count,
            }))
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Network(format!(
                "Serper returned {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let parsed: SerperResponse = response
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))?;

        Ok(format_results(query, &parsed))
    }
}

/// Render a Serper response as labelled text blocks
fn format_results(query: &str, response: &SerperResponse) -> String {
    let mut blocks = Vec::new();

    if let Some(answer) = response
        .answer_box
        .as_ref()
        .and_then(|a| a.answer.as_ref().or(a.snippet.as_ref()))
    {
        blocks.push(format!("Answer: {answer}"));
    }

    if let Some(kg) = &response.knowledge_graph {
        if let (Some(title), Some(description)) = (&kg.title, &kg.description) {
            blocks.push(format!("{title}: {description}"));
        }
    }

    for result in &response.organic {
        blocks.push(format!(
            "Title: {}\nLink: {}\nSnippet: {}\n---",
            result.title, result.link, result.snippet
        ));
    }

    if blocks.is_empty() {
        return format!("No results found for '{query}'.");
    }
    blocks.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_organic_results() {
        let response: SerperResponse = serde_json::from_str(
            r#"{
                "organic": [
                    {"title": "Flights SFO to ORD", "link": "https://example.com/a", "snippet": "From $120"},
                    {"title": "Cheap flights", "link": "https://example.com/b", "snippet": "Deals"}
                ]
            }"#,
        )
        .unwrap();

        let text = format_results("flights", &response);
        assert!(text.starts_with("Title: Flights SFO to ORD\nLink: https://example.com/a"));
        assert_eq!(text.matches("---").count(), 2);
    }

    #[test]
    fn test_format_answer_box_first() {
        let response: SerperResponse = serde_json::from_str(
            r#"{
                "answerBox": {"snippet": "Sunny, 21°C"},
                "knowledgeGraph": {"title": "Chicago", "description": "City in Illinois"},
                "organic": []
            }"#,
        )
        .unwrap();

        let text = format_results("weather", &response);
        assert_eq!(text, "Answer: Sunny, 21°C\nChicago: City in Illinois");
    }

    #[test]
    fn test_format_empty() {
        let text = format_results("nothing", &SerperResponse::default());
        assert_eq!(text, "No results found for 'nothing'.");
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = SerperConfig::new(SecretString::from("serper-secret-key".to_string()))
            .with_base_url("http://localhost:9999/")
            .with_result_count(5);
        let debug = format!("{config:?}");
        assert!(!debug.contains("serper-secret-key"));
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.result_count, 5);
    }
}
