//! Customer support: answer an inquiry, then review the answer

use crate::agent::Agent;
use crate::crew::Crew;
use crate::error::Result;
use crate::task::Task;
use crate::template::{inputs, Inputs};
use crewline_tools::SUPPORT_DOCS_TOOL;
use std::sync::Arc;

/// A customer inquiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportRequest {
    /// Customer company
    pub customer: String,
    /// Person who reached out
    pub person: String,
    /// The question
    pub inquiry: String,
}

impl Default for SupportRequest {
    fn default() -> Self {
        Self {
            customer: "Gister App".to_string(),
            person: "Ike".to_string(),
            inquiry: "I need help with setting up a Crew and kicking it off, specifically how can I \
                      add memory to my crew? Can you provide guidance?"
                .to_string(),
        }
    }
}

impl SupportRequest {
    /// Kickoff inputs
    #[must_use]
    pub fn inputs(&self) -> Inputs {
        inputs([
            ("customer", self.customer.as_str()),
            ("person", self.person.as_str()),
            ("inquiry", self.inquiry.as_str()),
        ])
    }
}

/// Support representative and QA specialist
#[derive(Debug, Clone)]
pub struct SupportAgents {
    /// Senior Support Representative
    pub representative: Arc<Agent>,
    /// Support Quality Assurance Specialist
    pub quality_assurance: Arc<Agent>,
}

/// Build the support agents for `customer`
#[must_use]
pub fn support_agents(customer: &str) -> SupportAgents {
    let representative = Agent::new(
        "Senior Support Representative",
        "Be the most friendly and helpful support representative in your team",
        format!(
            "You work at crewAI (https://crewai.com) and are now working on providing \
             support to {customer}, a super important customer for your company. \
             You need to make sure that you provide the best support! \
             Make sure to provide full complete answers, and make no assumptions."
        ),
    )
    .with_verbose(true);

    let quality_assurance = Agent::new(
        "Support Quality Assurance Specialist",
        "Get recognition for providing the best support quality assurance in your team",
        format!(
            "You work at crewAI (https://crewai.com) and are now working with your team \
             on a request from {customer} ensuring that the support representative is \
             providing the best support possible.\n\
             You need to make sure that the support representative is providing full \
             complete answers, and make no assumptions."
        ),
    )
    .with_delegation(true)
    .with_verbose(true);

    SupportAgents {
        representative: Arc::new(representative),
        quality_assurance: Arc::new(quality_assurance),
    }
}

/// `inquiry -> quality_review`; the inquiry may only read the support docs
#[must_use]
pub fn support_tasks(agents: &SupportAgents) -> Vec<Task> {
    let inquiry = Task::new(
        "inquiry",
        "{customer} just reached out with a super important ask:\n\
         {inquiry}\n\n\
         {person} from {customer} is the one that reached out. \
         Make sure to use everything you know to provide the best support possible. \
         You must strive to provide a complete and accurate response to the customer's inquiry.",
        "A detailed, informative response to the customer's inquiry that addresses \
         all aspects of their question.\n\
         The response should include references to everything you used to find the answer, \
         including external data or solutions. \
         Ensure the answer is complete, leaving no questions unanswered, and maintain a helpful \
         and friendly tone throughout.",
        Arc::clone(&agents.representative),
    )
    .with_tools([SUPPORT_DOCS_TOOL]);

    let quality_review = Task::new(
        "quality_review",
        "Review the response drafted by the Senior Support Representative for {customer}'s inquiry. \
         Ensure that the answer is comprehensive, accurate, and adheres to the \
         high-quality standards expected for customer support.\n\
         Verify that all parts of the customer's inquiry have been addressed \
         thoroughly, with a helpful and friendly tone.\n\
         Check for references and sources used to find the information, \
         ensuring the response is well-supported and leaves no questions unanswered.",
        "A final, detailed, and informative response ready to be sent to the customer.\n\
         This response should fully address the customer's inquiry, incorporating all \
         relevant feedback and improvements.\n\
         Don't be too formal, we are a chill and cool company \
         but maintain a professional and friendly tone throughout.",
        Arc::clone(&agents.quality_assurance),
    )
    .with_context(["inquiry"]);

    vec![inquiry, quality_review]
}

/// Assemble the support crew for `customer`
pub fn support_crew(customer: &str) -> Result<Crew> {
    let agents = support_agents(customer);
    let tasks = support_tasks(&agents);
    Crew::new(
        vec![agents.representative, agents.quality_assurance],
        tasks,
    )
}
