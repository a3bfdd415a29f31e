//! Built-in tools
//!
//! - Search: serper web search, in-site search
//! - Scrape: page text, open or bound to one URL
//! - File: directory listing
//! - Travel: ticket search, travel guide

mod directory;
mod scrape;
mod serper;
mod ticket_search;
mod travel_guide;
mod website_search;

pub use directory::DirectoryReadTool;
pub use scrape::ScrapeWebsiteTool;
pub use serper::SerperSearchTool;
pub use ticket_search::{
    format_ticket_report, TicketSearchParams, TicketSearchTool, TravelDetails, REPORT_LINES,
};
pub use travel_guide::{TravelGuideParams, TravelGuideTool};
pub use website_search::WebsiteSearchTool;

use crate::fetch::PageFetcher;
use crate::registry::{Tool, ToolRegistry};
use crate::search::SearchClient;
use std::sync::Arc;

/// Documentation page the support crew reads from
pub const SUPPORT_DOCS_URL: &str = "https://docs.crewai.com/how-to/Creating-a-Crew-and-kick-it-off/";

/// Name of the support documentation scrape tool
pub const SUPPORT_DOCS_TOOL: &str = "read_support_docs";

/// External services the built-in tools are built on
#[derive(Clone)]
pub struct BuiltinsConfig {
    /// Web search backend
    pub search: Arc<dyn SearchClient>,
    /// Page fetcher
    pub fetcher: Arc<dyn PageFetcher>,
}

impl BuiltinsConfig {
    /// Create a configuration
    #[must_use]
    pub fn new(search: Arc<dyn SearchClient>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { search, fetcher }
    }
}

/// Web search, page reading and in-site search
#[must_use]
pub fn research_tools(config: &BuiltinsConfig) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(SerperSearchTool::new(Arc::clone(&config.search))),
        Arc::new(ScrapeWebsiteTool::new(Arc::clone(&config.fetcher))),
        Arc::new(WebsiteSearchTool::new(Arc::clone(&config.fetcher))),
    ]
}

/// Scrape tool bound to the support documentation page
#[must_use]
pub fn docs_scrape_tools(fetcher: Arc<dyn PageFetcher>) -> Vec<Arc<dyn Tool>> {
    vec![Arc::new(ScrapeWebsiteTool::for_site(
        SUPPORT_DOCS_TOOL,
        SUPPORT_DOCS_URL,
        fetcher,
    ))]
}

/// Travel lookups
#[must_use]
pub fn travel_tools(config: &BuiltinsConfig) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(TicketSearchTool::new(Arc::clone(&config.search))),
        Arc::new(TravelGuideTool::new(Arc::clone(&config.search))),
    ]
}

/// Register every built-in tool
pub fn register_builtins(registry: &mut ToolRegistry, config: &BuiltinsConfig) {
    registry.register_all(research_tools(config));
    registry.register_all(docs_scrape_tools(Arc::clone(&config.fetcher)));
    registry.register_all(travel_tools(config));
    registry.register(Arc::new(DirectoryReadTool::new()));
}


#[cfg(test)]
mod tests {
    use super::test_support::{RecordingSearch, StaticFetcher};
    use super::*;
    use crate::registry::ToolCategory;

    #[test]
    fn test_register_builtins() {
        let config = BuiltinsConfig::new(
            Arc::new(RecordingSearch::new("")),
            Arc::new(StaticFetcher::new("")),
        );
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry, &config);

        assert_eq!(
            registry.list_names(),
            vec![
                DirectoryReadTool::NAME,
                SUPPORT_DOCS_TOOL,
                ScrapeWebsiteTool::NAME,
                WebsiteSearchTool::NAME,
                SerperSearchTool::NAME,
                TicketSearchTool::NAME,
                TravelGuideTool::NAME,
            ]
        );
        assert_eq!(registry.list_by_category(ToolCategory::Travel).len(), 2);
    }
}
