//! Travel guide tool
//!
//! Three lookups per destination, always in the same order: weather on the
//! travel date, hotels, tourist attractions.

use crate::error::Result;
use crate::registry::{Tool, ToolCategory, ToolDefinition, ToolOutput};
use crate::schema::{ParamKind, ParamSchema, ParamSpec};
use crate::search::SearchClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Input of the travel guide tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelGuideParams {
    /// The location for the travel guide
    pub location: String,
    /// The date of travel, `YYYY-MM-DD`
    pub travel_date: String,
    /// Return date, `YYYY-MM-DD`; no lookup uses it
    #[serde(default)]
    pub return_date: Option<String>,
}

impl TravelGuideParams {
    /// Declarative schema for the tool input
    #[must_use]
    pub fn schema() -> ParamSchema {
        ParamSchema::new(vec![
            ParamSpec::required("location", ParamKind::String, "The location for the travel guide."),
            ParamSpec::required(
                "travel_date",
                ParamKind::Date,
                "The date of travel in YYYY-MM-DD format.",
            ),
            ParamSpec::optional(
                "return_date",
                ParamKind::Date,
                "The return date in YYYY-MM-DD format, if applicable.",
            ),
        ])
    }

    /// Queries sent to the search backend, paired with their line labels
    #[must_use]
    pub fn queries(&self) -> [(String, String); 3] {
        let loc = &self.location;
        let date = &self.travel_date;
        [
            (
                format!("weather in {loc} on {date}"),
                format!("Weather in {loc} on {date}"),
            ),
            (format!("hotels in {loc} on {date}"), format!("Hotels in {loc}")),
            (
                format!("tourist attractions in {loc}"),
                format!("Tourist Attractions in {loc}"),
            ),
        ]
    }
}

/// Tool that gathers weather, hotels and attractions for a destination
pub struct TravelGuideTool {
    definition: ToolDefinition,
    search: Arc<dyn SearchClient>,
}

impl TravelGuideTool {
    /// Tool name
    pub const NAME: &'static str = "travel_guide";

    /// Create a new travel guide tool
    #[must_use]
    pub fn new(search: Arc<dyn SearchClient>) -> Self {
        let definition = ToolDefinition::new(
            Self::NAME,
            "Provides weather, hotel options and tourist attractions for a travel destination.",
        )
        .with_category(ToolCategory::Travel)
        .with_schema(TravelGuideParams::schema());

        Self { definition, search }
    }
}

#[async_trait::async_trait]
impl Tool for TravelGuideTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolOutput> {
        let start = Instant::now();
        let params: TravelGuideParams = self.definition.schema.parse(&input)?;
        info!(location = %params.location, date = %params.travel_date, "Building travel guide");

        let mut lines = Vec::with_capacity(3);
        for (query, label) in params.queries() {
            let results = self.search.search(&query).await?;
            lines.push(format!("{label}: {results}"));
        }

        Ok(ToolOutput::new(lines, start))
    }
}
