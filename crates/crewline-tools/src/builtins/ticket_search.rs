//! Ticket search tool
//!
//! Validates a traveler's details, runs a single flight search and returns
//! a six-line report: traveler/route, flight/luggage/companions,
//! companion/pet, preferred flight, results header, results body.

use crate::error::{Error, Result};
use crate::registry::{Tool, ToolCategory, ToolDefinition, ToolOutput};
use crate::schema::{ParamKind, ParamSchema, ParamSpec, DATE_FORMAT};
use crate::search::SearchClient;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Number of lines in a ticket report
pub const REPORT_LINES: usize = 6;

/// Travel details collected from a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSearchParams {
    /// The full name of the traveler
    pub full_name: String,
    /// The email address to send tickets to
    pub email: String,
    /// The departure location
    pub traveling_from: String,
    /// The destination location
    pub traveling_to: String,
    /// The date of travel, `YYYY-MM-DD`
    pub travel_date: String,
    /// The return date, `YYYY-MM-DD`
    pub return_date: Option<String>,
    /// The class of travel (economy, business, ...)
    pub flight_class: String,
    /// The number of luggage pieces
    pub luggage_number: u32,
    /// The number of travel companions
    pub travel_companions: u32,
    /// Type of travel companion (minor, pet, ...)
    pub companion_type: Option<String>,
    /// Type of pet if the companion is a pet
    pub pet_type: Option<String>,
    /// Preferred flight, or `None` for an open search
    pub preferred_flight: Option<String>,
    /// Whether the traveler is flexible with dates
    #[serde(default)]
    pub flexible_dates: bool,
}

/// The record a travel conversation fills in is exactly the ticket search input.
pub type TravelDetails = TicketSearchParams;

impl TicketSearchParams {
    /// Declarative schema for the tool input
    #[must_use]
    pub fn schema() -> ParamSchema {
        ParamSchema::new(vec![
            ParamSpec::required("full_name", ParamKind::String, "The full name of the traveler."),
            ParamSpec::required("email", ParamKind::Email, "The email address to send tickets to."),
            ParamSpec::required("traveling_from", ParamKind::String, "The departure location."),
            ParamSpec::required("traveling_to", ParamKind::String, "The destination location."),
            ParamSpec::required(
                "travel_date",
                ParamKind::Date,
                "The date of travel in YYYY-MM-DD format.",
            ),
            ParamSpec::optional(
                "return_date",
                ParamKind::Date,
                "The return date in YYYY-MM-DD format (optional).",
            ),
            ParamSpec::required(
                "flight_class",
                ParamKind::String,
                "The class of travel (e.g., economy, business).",
            ),
            ParamSpec::required("luggage_number", ParamKind::Integer, "The number of luggage pieces."),
            ParamSpec::required(
                "travel_companions",
                ParamKind::Integer,
                "The number of travel companions.",
            ),
            ParamSpec::optional(
                "companion_type",
                ParamKind::String,
                "Type of travel companion (e.g., minor, pet).",
            ),
            ParamSpec::optional("pet_type", ParamKind::String, "Type of pet if the companion is a pet."),
            ParamSpec::optional(
                "preferred_flight",
                ParamKind::String,
                "Preferred flight details or 'open' for an open search.",
            ),
            ParamSpec::optional(
                "flexible_dates",
                ParamKind::Boolean,
                "Indicates if the traveler is flexible with travel dates.",
            )
            .with_default(serde_json::json!(false)),
        ])
    }

    /// Validate raw tool input into typed parameters
    pub fn from_input(input: &serde_json::Value) -> Result<Self> {
        let params: Self = Self::schema().parse(input)?;
        params.check_dates()?;
        Ok(params)
    }

    /// Reject a return date earlier than the travel date
    pub fn check_dates(&self) -> Result<()> {
        let Some(return_date) = &self.return_date else {
            return Ok(());
        };
        let parse = |s: &str| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map_err(|_| Error::Validation(format!("'{s}' is not a YYYY-MM-DD date")))
        };
        if parse(return_date)? < parse(&self.travel_date)? {
            return Err(Error::Validation(format!(
                "return_date {return_date} is before travel_date {}",
                self.travel_date
            )));
        }
        Ok(())
    }

    /// The flight query sent to the search backend
    #[must_use]
    pub fn search_query(&self) -> String {
        format!(
            "flights from {} to {} on {}",
            self.traveling_from, self.traveling_to, self.travel_date
        )
    }

    /// Field-per-line summary used in task descriptions
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("Full Name: {}", self.full_name),
            format!("Email: {}", self.email),
            format!("Traveling From: {}", self.traveling_from),
            format!("Traveling To: {}", self.traveling_to),
            format!("Travel Date: {}", self.travel_date),
            format!("Return Date: {}", or_none(&self.return_date)),
            format!("Flight Class: {}", self.flight_class),
            format!("Luggage Number: {}", self.luggage_number),
            format!("Travel Companions: {}", self.travel_companions),
            format!("Companion Type: {}", or_none(&self.companion_type)),
            format!("Pet Type: {}", or_none(&self.pet_type)),
            format!("Preferred Flight: {}", self.preferred_flight_label()),
            format!("Flexible Dates: {}", self.flexible_dates),
        ]
    }

    fn preferred_flight_label(&self) -> &str {
        self.preferred_flight
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("Open Search")
    }
}

fn or_none(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("None")
}

/// Build the six-line ticket report
#[must_use]
pub fn format_ticket_report(params: &TicketSearchParams, search_results: &str) -> Vec<String> {
    vec![
        format!(
            "Found tickets for {} ({}) from {} to {} on {}:",
            params.full_name,
            params.email,
            params.traveling_from,
            params.traveling_to,
            params.travel_date
        ),
        format!(
            "Flight Class: {}, Luggage: {}, Companions: {}",
            params.flight_class, params.luggage_number, params.travel_companions
        ),
        format!(
            "Companion Type: {}, Pet Type: {}",
            or_none(&params.companion_type),
            or_none(&params.pet_type)
        ),
        format!("Preferred Flight: {}", params.preferred_flight_label()),
        "Search Results:".to_string(),
        search_results.to_string(),
    ]
}

/// Tool that searches for tickets based on travel details
pub struct TicketSearchTool {
    definition: ToolDefinition,
    search: Arc<dyn SearchClient>,
}

impl TicketSearchTool {
    /// Tool name
    pub const NAME: &'static str = "ticket_search";

    /// Create a new ticket search tool
    #[must_use]
    pub fn new(search: Arc<dyn SearchClient>) -> Self {
        let definition = ToolDefinition::new(
            Self::NAME,
            "Searches for tickets based on various travel details.",
        )
        .with_category(ToolCategory::Travel)
        .with_schema(TicketSearchParams::schema());

        Self { definition, search }
    }

    /// Run the search for already-validated parameters
    pub async fn search(&self, params: &TicketSearchParams) -> Result<Vec<String>> {
        let query = params.search_query();
        info!(query = %query, "Searching tickets");
        let results = self.search.search(&query).await?;
        Ok(format_ticket_report(params, &results))
    }
}

#[async_trait::async_trait]
impl Tool for TicketSearchTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolOutput> {
        let start = Instant::now();
        let params = TicketSearchParams::from_input(&input)?;
        let lines = self.search(&params).await?;
        Ok(ToolOutput::new(lines, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::test_support::RecordingSearch;
    use serde_json::json;

    fn jane_doe() -> serde_json::Value {
        json!({
            "full_name": "Jane Doe",
            "email": "jane.doe@example.com",
            "traveling_from": "San Francisco",
            "traveling_to": "Chicago",
            "travel_date": "2023-11-01",
            "return_date": "2023-11-05",
            "flight_class": "Business",
            "luggage_number": 1,
            "travel_companions": 0,
            "preferred_flight": "Direct"
        })
    }

    #[tokio::test]
    async fn test_report_shape() {
        let search = Arc::new(RecordingSearch::new("Title: UA 1234"));
        let tool = TicketSearchTool::new(search.clone());

        let out = tool.execute(jane_doe()).await.unwrap();
        assert_eq!(out.lines.len(), REPORT_LINES);
        assert!(out.lines[0].contains("from San Francisco to Chicago on 2023-11-01"));
        assert!(out.lines[0].contains("Jane Doe"));
        assert_eq!(out.lines[1], "Flight Class: Business, Luggage: 1, Companions: 0");
        assert_eq!(out.lines[3], "Preferred Flight: Direct");
        assert_eq!(out.lines[4], "Search Results:");
        assert_eq!(out.lines[5], "Title: UA 1234");
        assert_eq!(
            search.queries(),
            vec!["flights from San Francisco to Chicago on 2023-11-01"]
        );
    }

    #[tokio::test]
    async fn test_missing_required_field_never_searches() {
        let required: Vec<&str> = TicketSearchParams::schema()
            .params()
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();
        assert_eq!(required.len(), 8);

        for field in required {
            let search = Arc::new(RecordingSearch::new("unused"));
            let tool = TicketSearchTool::new(search.clone());
            let mut input = jane_doe();
            input.as_object_mut().unwrap().remove(field);

            let err = tool.execute(input).await.unwrap_err();
            assert!(err.is_validation(), "{field}: {err}");
            assert!(search.queries().is_empty(), "{field} reached the network");
        }
    }

    #[tokio::test]
    async fn test_invalid_email_never_searches() {
        let search = Arc::new(RecordingSearch::new("unused"));
        let tool = TicketSearchTool::new(search.clone());
        let mut input = jane_doe();
        input["email"] = json!("jane.doe-at-example.com");

        assert!(tool.execute(input).await.unwrap_err().is_validation());
        assert!(search.queries().is_empty());
    }

    #[test]
    fn test_optional_defaults() {
        let params = TicketSearchParams::from_input(&jane_doe()).unwrap();
        assert_eq!(params.companion_type, None);
        assert_eq!(params.pet_type, None);
        assert!(!params.flexible_dates);

        let report = format_ticket_report(&params, "");
        assert_eq!(report[2], "Companion Type: None, Pet Type: None");
        assert!(params
            .summary_lines()
            .contains(&"Flexible Dates: false".to_string()));
    }

    #[test]
    fn test_open_search_when_no_preference() {
        let mut input = jane_doe();
        input.as_object_mut().unwrap().remove("preferred_flight");
        let params = TicketSearchParams::from_input(&input).unwrap();
        assert_eq!(format_ticket_report(&params, "")[3], "Preferred Flight: Open Search");
    }

    #[test]
    fn test_return_before_travel_rejected() {
        let mut input = jane_doe();
        input["return_date"] = json!("2023-10-30");
        let err = TicketSearchParams::from_input(&input).unwrap_err();
        assert!(err.is_validation());

        input["return_date"] = json!(null);
        assert!(TicketSearchParams::from_input(&input).is_ok());
    }

    #[test]
    fn test_pet_companion() {
        let mut input = jane_doe();
        input["travel_companions"] = json!(1);
        input["companion_type"] = json!("Pet");
        input["pet_type"] = json!("Dog");
        input["flexible_dates"] = json!(true);
        let params = TicketSearchParams::from_input(&input).unwrap();
        assert!(params.flexible_dates);
        assert_eq!(
            format_ticket_report(&params, "")[2],
            "Companion Type: Pet, Pet Type: Dog"
        );
    }
}
