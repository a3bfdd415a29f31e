//! Travel planning: collect details, search tickets, build a guide, summarize
//!
//! The full crew collects details conversationally. The sample crew starts
//! from a fixed [`TravelDetails`] record instead and runs end to end without
//! user input.

use crate::agent::Agent;
use crate::crew::Crew;
use crate::error::Result;
use crate::guides::TRAVEL_ASSISTANT;
use crate::task::Task;
use crewline_tools::{TicketSearchTool, TravelDetails, TravelGuideTool};
use std::sync::Arc;

const SUMMARY_DESCRIPTION: &str = "Collate the information gathered from the ticket search and travel guide tasks.\n\
     Present a comprehensive summary to the user, including:\n\
     1. Available flight options\n\
     2. Weather conditions at the departure and destination\n\
     3. Hotel options and tourist attractions\n\
     Ensure the summary is clear and allows the user to make an informed decision.";

const SUMMARY_OUTPUT: &str =
    "A comprehensive summary of travel options, weather, accommodations, and attractions.";

/// Planner-consultant and information coordinator
#[derive(Debug, Clone)]
pub struct TravelAgents {
    /// Travel Planner and Consultant
    pub planner: Arc<Agent>,
    /// Travel Information Coordinator
    pub coordinator: Arc<Agent>,
}

impl TravelAgents {
    fn members(&self) -> Vec<Arc<Agent>> {
        vec![Arc::clone(&self.planner), Arc::clone(&self.coordinator)]
    }
}

/// Build the travel agents
///
/// The planner is briefed with the travel assistant guide's key points.
#[must_use]
pub fn travel_agents() -> TravelAgents {
    let planner = Agent::new(
        "Travel Planner and Consultant",
        "Collect complete and valid travel details and find the best tickets and destination information",
        format!(
            "You are an experienced travel consultant. {}\n\
             When talking to travelers you follow these guidelines:\n{}",
            TRAVEL_ASSISTANT.introduction,
            TRAVEL_ASSISTANT.key_points_text()
        ),
    )
    .with_verbose(true);

    let coordinator = Agent::new(
        "Travel Information Coordinator",
        "Turn ticket searches and destination guides into a clear summary the traveler can act on",
        "You coordinate travel information for travelers. You take flight options, weather, \
         hotels and attractions gathered by the travel planner and present them so the traveler \
         can make an informed decision.",
    )
    .with_verbose(true);

    TravelAgents {
        planner: Arc::new(planner),
        coordinator: Arc::new(coordinator),
    }
}

/// `gather_info -> search_tickets -> travel_guide -> summarize`
#[must_use]
pub fn travel_tasks(agents: &TravelAgents) -> Vec<Task> {
    let no_tools: [&str; 0] = [];

    let gather_info = Task::new(
        "gather_info",
        "Gather all necessary travel information from the user:\n\
         1. Full Name\n\
         2. Email Address\n\
         3. Traveling From\n\
         4. Traveling To\n\
         5. Travel Date\n\
         6. Return Date (if applicable)\n\
         7. Flight Class\n\
         8. Luggage Number\n\
         9. Travel Companions\n\
         10. Companion Type\n\
         11. Preferred Flight\n",
        "All necessary travel information collected from the user.",
        Arc::clone(&agents.planner),
    )
    .with_tools(no_tools);

    let search_tickets = Task::new(
        "search_tickets",
        format!(
            "Use the {} tool to find available tickets based on the gathered information.\n\
             Ensure to check for the best options and provide a summary of the findings.",
            TicketSearchTool::NAME
        ),
        "A list of available tickets based on the user's travel preferences.",
        Arc::clone(&agents.planner),
    )
    .with_tools([TicketSearchTool::NAME])
    .with_context(["gather_info"]);

    let travel_guide = Task::new(
        "travel_guide",
        format!(
            "Use the {} tool to gather information about the weather, accommodations, and attractions \
             at the departure and destination locations.",
            TravelGuideTool::NAME
        ),
        "Weather conditions, hotel options, and tourist attractions at the specified locations.",
        Arc::clone(&agents.planner),
    )
    .with_tools([TravelGuideTool::NAME])
    .with_context(["gather_info"]);

    let summarize = Task::new(
        "summarize",
        SUMMARY_DESCRIPTION,
        SUMMARY_OUTPUT,
        Arc::clone(&agents.coordinator),
    )
    .with_context(["search_tickets", "travel_guide"]);

    vec![gather_info, search_tickets, travel_guide, summarize]
}

/// Assemble the full travel crew
pub fn travel_crew() -> Result<Crew> {
    let agents = travel_agents();
    let tasks = travel_tasks(&agents);
    Crew::new(agents.members(), tasks)
}

/// Fixed details used by the sample run
#[must_use]
pub fn sample_travel_details() -> TravelDetails {
    TravelDetails {
        full_name: "Jane Doe".to_string(),
        email: "jane.doe@example.com".to_string(),
        traveling_from: "San Francisco".to_string(),
        traveling_to: "Chicago".to_string(),
        travel_date: "2023-11-01".to_string(),
        return_date: Some("2023-11-05".to_string()),
        flight_class: "Business".to_string(),
        luggage_number: 1,
        travel_companions: 0,
        companion_type: None,
        pet_type: None,
        preferred_flight: Some("Direct".to_string()),
        flexible_dates: false,
    }
}

/// `gather_info -> summarize` over known details
#[must_use]
pub fn sample_travel_tasks(agents: &TravelAgents, details: &TravelDetails) -> Vec<Task> {
    let gather_info = Task::new(
        "gather_info",
        format!(
            "Process the following travel details and provide a summary:\n{}\n",
            details.summary_lines().join("\n")
        ),
        "A summary of travel options based on the provided details.",
        Arc::clone(&agents.planner),
    )
    .with_tools([TicketSearchTool::NAME, TravelGuideTool::NAME]);

    let summarize = Task::new(
        "summarize",
        SUMMARY_DESCRIPTION,
        SUMMARY_OUTPUT,
        Arc::clone(&agents.coordinator),
    );

    vec![gather_info, summarize]
}

/// Assemble the sample travel crew
pub fn sample_travel_crew() -> Result<Crew> {
    let agents = travel_agents();
    let tasks = sample_travel_tasks(&agents, &sample_travel_details());
    Crew::new(agents.members(), tasks)
}
