//! Crewline Core - Crew Assembly and Execution
//!
//! This crate provides the declarative side of a crew run:
//! - Agents and tasks: personas, descriptions, tool assignment, context
//! - Crew: validated, ordered assembly rendered from kickoff inputs
//! - Engine: the `CrewEngine` seam and a sequential LLM-backed adapter
//! - Catalogues: content topics and communication guides
//! - Workflows: content, support and travel crews

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod agent;
pub mod crew;
pub mod engine;
pub mod error;
pub mod guides;
pub mod task;
pub mod template;
pub mod topics;
pub mod workflows;

pub use agent::Agent;
pub use crew::{Crew, CrewOutput};
pub use engine::{CrewEngine, EngineConfig, LlmCrewEngine};
pub use error::{Error, Result};
pub use guides::{FieldPrompt, Guide, GuideTemplate};
pub use task::{Task, TaskOutput};
pub use template::{inputs, render, Inputs};
pub use topics::{all_topics, categories, get_topic};
