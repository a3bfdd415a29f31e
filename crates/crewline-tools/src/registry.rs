//! Registry - Tool registration and discovery
//!
//! Tools are registered once at startup and looked up by name when an
//! agent or task references them. The registry also renders the LLM
//! function definitions for a given set of tool names.

use crate::error::{Error, Result};
use crate::schema::ParamSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Tool category for organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    /// Web search
    Search,
    /// Page scraping
    Scrape,
    /// Local file system
    File,
    /// Travel lookups
    Travel,
}

impl ToolCategory {
    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Scrape => "scrape",
            Self::File => "file",
            Self::Travel => "travel",
        }
    }
}

/// Tool metadata and schema
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    /// Unique tool name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Parameter schema
    pub schema: ParamSchema,
    /// Tool category
    pub category: ToolCategory,
}

impl ToolDefinition {
    /// Create a new tool definition with no parameters
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema: ParamSchema::empty(),
            category: ToolCategory::Search,
        }
    }

    /// Set the parameter schema
    #[must_use]
    pub fn with_schema(mut self, schema: ParamSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Set the category
    #[must_use]
    pub fn with_category(mut self, category: ToolCategory) -> Self {
        self.category = category;
        self
    }

    /// JSON Schema of the parameters
    #[must_use]
    pub fn parameters(&self) -> serde_json::Value {
        self.schema.to_json_schema()
    }

    /// Convert to the LLM function-calling definition
    #[must_use]
    pub fn to_llm(&self) -> crewline_llm::ToolDefinition {
        crewline_llm::ToolDefinition::new(&self.name, &self.description, self.parameters())
    }
}

/// Output of a tool execution: ordered, labelled lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Output lines, in display order
    pub lines: Vec<String>,
    /// Execution duration in milliseconds
    pub duration_ms: u64,
}

impl ToolOutput {
    /// Create an output, measuring duration from `start`
    #[must_use]
    pub fn new(lines: Vec<String>, start: Instant) -> Self {
        Self {
            lines,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Lines joined for display or for feeding back to a model
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Trait for tool implementations
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool definition
    fn definition(&self) -> &ToolDefinition;

    /// Execute the tool with given input
    ///
    /// Implementations validate `input` against their schema before any
    /// external call is made.
    async fn execute(&self, input: serde_json::Value) -> Result<ToolOutput>;
}

/// Registry for managing tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.definition().name.clone();
        debug!(tool = %name, "Registering tool");
        self.tools.insert(name, tool);
    }

    /// Register several tools
    pub fn register_all(&mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) {
        for tool in tools {
            self.register(tool);
        }
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Check if a tool exists
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// List all tool names, sorted
    #[must_use]
    pub fn list_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// List tool definitions in a category
    #[must_use]
    pub fn list_by_category(&self, category: ToolCategory) -> Vec<&ToolDefinition> {
        self.tools
            .values()
            .map(|t| t.definition())
            .filter(|d| d.category == category)
            .collect()
    }

    /// Get tool count
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// LLM function definitions for `names`, in the given order
    ///
    /// Fails if any name is not registered.
    pub fn to_llm_tools(&self, names: &[String]) -> Result<Vec<crewline_llm::ToolDefinition>> {
        names
            .iter()
            .map(|name| {
                self.tools
                    .get(name)
                    .map(|t| t.definition().to_llm())
                    .ok_or_else(|| Error::NotFound(name.clone()))
            })
            .collect()
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, input: serde_json::Value) -> Result<ToolOutput> {
        let tool = self
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        debug!(tool = %name, "Executing tool");
        tool.execute(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ParamKind, ParamSpec};

    struct EchoTool {
        definition: ToolDefinition,
    }

    impl EchoTool {
        fn new(name: &str) -> Self {
            Self {
                definition: ToolDefinition::new(name, "Echo the text back")
                    .with_category(ToolCategory::File)
                    .with_schema(ParamSchema::new(vec![ParamSpec::required(
                        "text",
                        ParamKind::String,
                        "Text to echo",
                    )])),
            }
        }
    }

    #[async_trait::async_trait]
    impl Tool for EchoTool {
        fn definition(&self) -> &ToolDefinition {
            &self.definition
        }

        async fn execute(&self, input: serde_json::Value) -> Result<ToolOutput> {
            let start = Instant::now();
            let params = self.definition.schema.validate(&input)?;
            Ok(ToolOutput::new(
                vec![format!("Echo: {}", params["text"].as_str().unwrap_or(""))],
                start,
            ))
        }
    }

    #[test]
    fn test_registry() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register_all([
            Arc::new(EchoTool::new("b_echo")) as Arc<dyn Tool>,
            Arc::new(EchoTool::new("a_echo")),
        ]);
        assert_eq!(registry.len(), 2);
        assert!(registry.has("a_echo"));
        assert_eq!(registry.list_names(), vec!["a_echo", "b_echo"]);
        assert_eq!(registry.list_by_category(ToolCategory::File).len(), 2);
        assert!(registry.list_by_category(ToolCategory::Search).is_empty());
    }

    #[test]
    fn test_to_llm_tools_order_and_missing() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool::new("one")));
        registry.register(Arc::new(EchoTool::new("two")));

        let defs = registry
            .to_llm_tools(&["two".to_string(), "one".to_string()])
            .unwrap();
        assert_eq!(defs[0].name, "two");
        assert_eq!(defs[1].parameters["required"][0], "text");

        assert!(matches!(
            registry.to_llm_tools(&["three".to_string()]),
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_execute_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool::new("echo")));

        let out = registry
            .execute("echo", serde_json::json!({"text": "hi"}))
            .await
            .unwrap();
        assert_eq!(out.text(), "Echo: hi");

        let err = registry
            .execute("echo", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(err.is_validation());

        assert!(matches!(
            registry.execute("nope", serde_json::json!({})).await,
            Err(Error::NotFound(_))
        ));
    }
}
