//! Ready-made crews
//!
//! - Content: plan, write and edit a blog post on a topic
//! - Support: answer a customer inquiry from the docs, then review it
//! - Travel: collect details, search tickets, build a guide, summarize

pub mod content;
pub mod support;
pub mod travel;

pub use content::{content_agents, content_crew, content_inputs, content_tasks, ContentAgents};
pub use support::{support_agents, support_crew, support_tasks, SupportAgents, SupportRequest};
pub use travel::{
    sample_travel_crew, sample_travel_details, sample_travel_tasks, travel_agents, travel_crew,
    travel_tasks, TravelAgents,
};
