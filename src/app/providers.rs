//! Client wiring
//!
//! Turns configuration and credentials into the LLM provider, the tool
//! registry and the engine a crew runs on.

use super::config::AppConfig;
use super::credentials::Credentials;
use anyhow::{Context, Result};
use crewline_core::LlmCrewEngine;
use crewline_llm::{LlmProvider, OpenAiCompatConfig, OpenAiCompatProvider};
use crewline_tools::{
    register_builtins, BuiltinsConfig, HttpFetcher, SerperClient, SerperConfig, ToolRegistry,
};
use std::sync::Arc;
use tracing::info;

/// Build the configured LLM provider
pub fn resolve_llm_provider(
    config: &AppConfig,
    creds: &Credentials,
) -> Result<Arc<dyn LlmProvider>> {
    let mut provider_config = OpenAiCompatConfig::new(creds.provider, creds.llm_key.clone())
        .with_model(config.llm.effective_model()?);
    if let Some(base_url) = &config.llm.base_url {
        provider_config = provider_config.with_base_url(base_url);
    }

    info!(
        provider = %creds.provider,
        model = %provider_config.default_model,
        "Using LLM provider"
    );
    let provider = OpenAiCompatProvider::new(provider_config)
        .with_context(|| format!("Failed to initialize {} provider", creds.provider))?;
    Ok(Arc::new(provider))
}

/// Build the registry with every built-in tool
pub fn build_tool_registry(config: &AppConfig, creds: &Credentials) -> Result<ToolRegistry> {
    let serper = SerperClient::new(
        SerperConfig::new(creds.serper_key.clone())
            .with_base_url(&config.search.base_url)
            .with_result_count(config.search.result_count),
    )
    .context("Failed to initialize search client")?;
    let fetcher = HttpFetcher::new().context("Failed to initialize page fetcher")?;

    let builtins = BuiltinsConfig::new(Arc::new(serper), Arc::new(fetcher));
    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry, &builtins);
    info!(count = registry.len(), "Registered built-in tools");
    Ok(registry)
}

/// Build the engine a crew runs on
pub fn build_engine(config: &AppConfig, creds: &Credentials) -> Result<LlmCrewEngine> {
    let provider = resolve_llm_provider(config, creds)?;
    let tools = build_tool_registry(config, creds)?;
    Ok(LlmCrewEngine::new(
        provider,
        Arc::new(tools),
        config.llm.engine_config()?,
    ))
}
