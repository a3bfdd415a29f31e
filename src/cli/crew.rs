//! Crew commands: resolve inputs, check credentials, kick off

use crate::app::{build_engine, AppConfig, Credentials};
use anyhow::{Context, Result};
use crewline_core::workflows::{
    content_crew, content_inputs, sample_travel_crew, support_crew, travel_crew, SupportRequest,
};
use crewline_core::{get_topic, Crew, CrewOutput, Inputs};
use tracing::info;

/// Topic for the content crew; an explicit topic wins over the catalogue
pub fn resolve_topic(category: &str, index: usize, topic: Option<String>) -> Result<String> {
    match topic.filter(|t| !t.trim().is_empty()) {
        Some(topic) => Ok(topic),
        None => Ok(get_topic(category, index)?.to_string()),
    }
}

/// Support request with defaults filled in
pub fn resolve_request(
    customer: Option<String>,
    person: Option<String>,
    inquiry: Option<String>,
) -> SupportRequest {
    let default = SupportRequest::default();
    SupportRequest {
        customer: customer.unwrap_or(default.customer),
        person: person.unwrap_or(default.person),
        inquiry: inquiry.unwrap_or(default.inquiry),
    }
}

pub async fn content(
    config: &AppConfig,
    category: &str,
    index: usize,
    topic: Option<String>,
) -> Result<()> {
    let topic = resolve_topic(category, index, topic)?;
    info!(%topic, "Selected topic");
    let crew = content_crew()?;
    kickoff(config, crew, content_inputs(&topic)).await
}

pub async fn support(
    config: &AppConfig,
    customer: Option<String>,
    person: Option<String>,
    inquiry: Option<String>,
) -> Result<()> {
    let request = resolve_request(customer, person, inquiry);
    let crew = support_crew(&request.customer)?;
    kickoff(config, crew, request.inputs()).await
}

/// Travel crew; `full` runs all four steps instead of the sample traveler
pub fn select_travel_crew(full: bool) -> Result<Crew> {
    let crew = if full {
        travel_crew()?
    } else {
        sample_travel_crew()?
    };
    Ok(crew)
}

pub async fn travel(config: &AppConfig, full: bool) -> Result<()> {
    let crew = select_travel_crew(full)?;
    kickoff(config, crew, Inputs::new()).await
}

async fn kickoff(config: &AppConfig, crew: Crew, inputs: Inputs) -> Result<()> {
    let output = run_crew(config, crew, inputs).await?;
    println!("{}", output.raw);
    Ok(())
}

async fn run_crew(config: &AppConfig, crew: Crew, inputs: Inputs) -> Result<CrewOutput> {
    let provider = config.llm.provider_kind()?;
    let creds = Credentials::from_env(provider).context("Credentials check failed")?;
    let engine = build_engine(config, &creds)?;

    let crew = crew.with_verbose(config.app.verbose > 0);
    info!(tasks = ?crew.task_names(), "Kicking off crew");
    let output = crew.kickoff(&engine, &inputs).await?;
    info!(tasks = output.tasks_output.len(), "Crew finished");
    Ok(output)
}
