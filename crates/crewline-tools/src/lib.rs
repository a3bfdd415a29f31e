//! Crewline Tools - Tool Registry and Built-in Tools
//!
//! This crate provides the tool side of a crew:
//! - Registry: tool registration, lookup and LLM function definitions
//! - Schema: declarative parameter validation with defaults
//! - Search / Fetch: the two external lookups tools are built on
//! - Path: validation for model-chosen filesystem paths
//! - Builtins: serper search, website scrape/search, directory read,
//!   ticket search and travel guide

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builtins;
pub mod error;
pub mod fetch;
pub mod path;
pub mod registry;
pub mod schema;
pub mod search;

pub use builtins::{
    docs_scrape_tools, register_builtins, research_tools, travel_tools, BuiltinsConfig,
    DirectoryReadTool, ScrapeWebsiteTool, SerperSearchTool, TicketSearchParams, TicketSearchTool,
    TravelDetails, TravelGuideParams, TravelGuideTool, WebsiteSearchTool, SUPPORT_DOCS_TOOL,
    SUPPORT_DOCS_URL,
};
pub use error::{Error, Result};
pub use fetch::{html_to_text, HttpFetcher, PageFetcher};
pub use path::validate_path;
pub use registry::{Tool, ToolCategory, ToolDefinition, ToolOutput, ToolRegistry};
pub use schema::{ParamKind, ParamSchema, ParamSpec};
pub use search::{SearchClient, SerperClient, SerperConfig};
