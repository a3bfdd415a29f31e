//! Serper web search tool

use crate::error::Result;
use crate::registry::{Tool, ToolCategory, ToolDefinition, ToolOutput};
use crate::schema::{ParamKind, ParamSchema, ParamSpec};
use crate::search::SearchClient;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SerperSearchInput {
    search_query: String,
}

/// Tool that searches the internet with Serper
pub struct SerperSearchTool {
    definition: ToolDefinition,
    search: Arc<dyn SearchClient>,
}

impl SerperSearchTool {
    /// Tool name
    pub const NAME: &'static str = "search_the_internet";

    /// Create a new search tool
    #[must_use]
    pub fn new(search: Arc<dyn SearchClient>) -> Self {
        let definition = ToolDefinition::new(
            Self::NAME,
            "Search the internet with a query and return the most relevant results.",
        )
        .with_category(ToolCategory::Search)
        .with_schema(ParamSchema::new(vec![ParamSpec::required(
            "search_query",
            ParamKind::String,
            "Mandatory search query you want to use to search the internet.",
        )]));

        Self { definition, search }
    }
}

#[async_trait::async_trait]
impl Tool for SerperSearchTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolOutput> {
        let start = Instant::now();
        let input: SerperSearchInput = self.definition.schema.parse(&input)?;

        debug!(query = %input.search_query, "Web search");
        let results = self.search.search(&input.search_query).await?;

        Ok(ToolOutput::new(
            results.lines().map(str::to_string).collect(),
            start,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::test_support::RecordingSearch;
    use serde_json::json;

    #[tokio::test]
    async fn test_search_passthrough() {
        let search = Arc::new(RecordingSearch::new("Title: Rust\nLink: https://rust-lang.org"));
        let tool = SerperSearchTool::new(search.clone());

        let out = tool
            .execute(json!({"search_query": "rust language"}))
            .await
            .unwrap();
        assert_eq!(out.lines.len(), 2);
        assert_eq!(search.queries(), vec!["rust language"]);
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let search = Arc::new(RecordingSearch::new("unused"));
        let tool = SerperSearchTool::new(search.clone());

        assert!(tool
            .execute(json!({"search_query": "  "}))
            .await
            .unwrap_err()
            .is_validation());
        assert!(search.queries().is_empty());
    }
}
