//! Website search tool
//!
//! Fetches a page and ranks its paragraphs by how many query terms they
//! contain. No embeddings, no index; the page is read fresh on every call.

use crate::error::Result;
use crate::fetch::{html_to_text, PageFetcher};
use crate::registry::{Tool, ToolCategory, ToolDefinition, ToolOutput};
use crate::schema::{ParamKind, ParamSchema, ParamSpec};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Paragraphs returned per query
const MAX_MATCHES: usize = 5;

/// Terms shorter than this are ignored when scoring
const MIN_TERM_LEN: usize = 3;

#[derive(Debug, Deserialize)]
struct WebsiteSearchInput {
    search_query: String,
    website_url: String,
}

/// Tool that searches within the content of a single website
pub struct WebsiteSearchTool {
    definition: ToolDefinition,
    fetcher: Arc<dyn PageFetcher>,
}

impl WebsiteSearchTool {
    /// Tool name
    pub const NAME: &'static str = "search_in_a_specific_website";

    /// Create a new website search tool
    #[must_use]
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        let definition = ToolDefinition::new(
            Self::NAME,
            "Search a query within the content of a specific website.",
        )
        .with_category(ToolCategory::Search)
        .with_schema(ParamSchema::new(vec![
            ParamSpec::required(
                "search_query",
                ParamKind::String,
                "Mandatory search query you want to use to search a specific website.",
            ),
            ParamSpec::required(
                "website_url",
                ParamKind::String,
                "Mandatory valid website URL you want to search on.",
            ),
        ]));

        Self {
            definition,
            fetcher,
        }
    }
}

/// Rank `text` paragraphs against `query`, best first, ties in page order
fn rank_paragraphs<'a>(text: &'a str, query: &str) -> Vec<&'a str> {
    let terms: Vec<String> = query
        .split_whitespace()
        .map(|t| {
            t.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|t| t.chars().count() >= MIN_TERM_LEN)
        .collect();

    let mut scored: Vec<(usize, usize, &str)> = text
        .lines()
        .enumerate()
        .filter_map(|(pos, line)| {
            let lower = line.to_lowercase();
            let score = terms.iter().filter(|t| lower.contains(t.as_str())).count();
            (score > 0).then_some((score, pos, line))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored
        .into_iter()
        .take(MAX_MATCHES)
        .map(|(_, _, line)| line)
        .collect()
}

#[async_trait::async_trait]
impl Tool for WebsiteSearchTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolOutput> {
        let start = Instant::now();
        let input: WebsiteSearchInput = self.definition.schema.parse(&input)?;

        debug!(url = %input.website_url, query = %input.search_query, "Searching website");
        let html = self.fetcher.fetch(&input.website_url).await?;
        let text = html_to_text(&html);

        let matches = rank_paragraphs(&text, &input.search_query);
        let mut lines = vec![format!(
            "Results for '{}' on {}:",
            input.search_query, input.website_url
        )];
        if matches.is_empty() {
            lines.push("No relevant content found.".to_string());
        } else {
            lines.extend(matches.into_iter().map(str::to_string));
        }

        Ok(ToolOutput::new(lines, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::test_support::StaticFetcher;
    use serde_json::json;

    #[test]
    fn test_rank_paragraphs() {
        let text = "Agents have roles\nCrew memory is enabled with memory=True\nTasks need agents\nShort-term memory uses RAG";
        let ranked = rank_paragraphs(text, "crew memory?");
        assert_eq!(
            ranked,
            vec![
                "Crew memory is enabled with memory=True",
                "Short-term memory uses RAG",
            ]
        );
        assert!(rank_paragraphs(text, "a an").is_empty());
    }

    #[tokio::test]
    async fn test_no_matches() {
        let fetcher = Arc::new(StaticFetcher::new("<p>Nothing here</p>"));
        let tool = WebsiteSearchTool::new(fetcher);

        let out = tool
            .execute(json!({"search_query": "quantum", "website_url": "https://example.com"}))
            .await
            .unwrap();
        assert_eq!(out.lines[1], "No relevant content found.");
    }

    #[tokio::test]
    async fn test_requires_both_fields() {
        let fetcher = Arc::new(StaticFetcher::new(""));
        let tool = WebsiteSearchTool::new(fetcher.clone());

        assert!(tool
            .execute(json!({"search_query": "x"}))
            .await
            .unwrap_err()
            .is_validation());
        assert!(fetcher.urls().is_empty());
    }
}
