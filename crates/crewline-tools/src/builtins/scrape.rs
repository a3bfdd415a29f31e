//! Scrape website tool
//!
//! Either bound to one site at construction, in which case it takes no
//! input, or open, in which case the caller supplies `website_url`.

use crate::error::Result;
use crate::fetch::{html_to_text, PageFetcher};
use crate::registry::{Tool, ToolCategory, ToolDefinition, ToolOutput};
use crate::schema::{ParamKind, ParamSchema, ParamSpec};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ScrapeInput {
    website_url: String,
}

/// Tool that reads the text content of a web page
pub struct ScrapeWebsiteTool {
    definition: ToolDefinition,
    fetcher: Arc<dyn PageFetcher>,
    fixed_url: Option<String>,
}

impl ScrapeWebsiteTool {
    /// Tool name of the open variant
    pub const NAME: &'static str = "read_website_content";

    /// Create a scrape tool that accepts any URL
    #[must_use]
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        let definition = ToolDefinition::new(
            Self::NAME,
            "Read website content. Provide the full URL of the page to read.",
        )
        .with_category(ToolCategory::Scrape)
        .with_schema(ParamSchema::new(vec![ParamSpec::required(
            "website_url",
            ParamKind::String,
            "Mandatory website url to read the file.",
        )]));

        Self {
            definition,
            fetcher,
            fixed_url: None,
        }
    }

    /// Create a scrape tool bound to one page
    #[must_use]
    pub fn for_site(
        name: impl Into<String>,
        url: impl Into<String>,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        let url = url.into();
        let definition = ToolDefinition::new(
            name,
            format!("Read the content of {url}. Takes no input."),
        )
        .with_category(ToolCategory::Scrape);

        Self {
            definition,
            fetcher,
            fixed_url: Some(url),
        }
    }

    /// URL this tool is bound to, if any
    #[must_use]
    pub fn fixed_url(&self) -> Option<&str> {
        self.fixed_url.as_deref()
    }
}

#[async_trait::async_trait]
impl Tool for ScrapeWebsiteTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolOutput> {
        let start = Instant::now();
        let url = match &self.fixed_url {
            Some(url) => url.clone(),
            None => self.definition.schema.parse::<ScrapeInput>(&input)?.website_url,
        };

        debug!(url = %url, "Scraping page");
        let html = self.fetcher.fetch(&url).await?;
        let text = html_to_text(&html);

        let mut lines = vec![format!("Content of {url}:")];
        lines.extend(text.lines().map(str::to_string));
        Ok(ToolOutput::new(lines, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::test_support::StaticFetcher;
    use serde_json::json;

    const PAGE: &str = "<html><body><h1>Crews</h1><p>Add <b>memory</b> with memory=True.</p></body></html>";

    #[tokio::test]
    async fn test_fixed_site_ignores_input() {
        let fetcher = Arc::new(StaticFetcher::new(PAGE));
        let tool = ScrapeWebsiteTool::for_site("docs", "https://docs.example.com/crews", fetcher.clone());

        assert!(tool.definition().schema.params().is_empty());
        let out = tool.execute(json!({})).await.unwrap();
        assert_eq!(
            out.lines,
            vec![
                "Content of https://docs.example.com/crews:",
                "Crews",
                "Add memory with memory=True.",
            ]
        );
        assert_eq!(fetcher.urls(), vec!["https://docs.example.com/crews"]);
    }

    #[tokio::test]
    async fn test_open_site_requires_url() {
        let fetcher = Arc::new(StaticFetcher::new(PAGE));
        let tool = ScrapeWebsiteTool::new(fetcher.clone());

        assert!(tool.execute(json!({})).await.unwrap_err().is_validation());
        assert!(fetcher.urls().is_empty());

        tool.execute(json!({"website_url": "https://example.com"}))
            .await
            .unwrap();
        assert_eq!(fetcher.urls(), vec!["https://example.com"]);
    }
}
