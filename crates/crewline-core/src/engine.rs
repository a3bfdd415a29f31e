//! Crew execution engines
//!
//! [`CrewEngine`] is the seam between crew assembly and whatever actually
//! runs the agents. [`LlmCrewEngine`] is a thin sequential adapter: each task
//! becomes one conversation with an [`LlmProvider`], and any tool calls the
//! model emits are forwarded to the [`ToolRegistry`]. It has no planning,
//! memory or delegation of its own.

use crate::crew::{Crew, CrewOutput};
use crate::error::{Error, Result};
use crate::task::{Task, TaskOutput};
use crewline_llm::{
    CompletionRequest, LlmProvider, Message, ToolCall, ToolChoice, ToolCompletionRequest,
};
use crewline_tools::ToolRegistry;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs an assembled, rendered crew
#[async_trait::async_trait]
pub trait CrewEngine: Send + Sync {
    /// Engine name for logs
    fn name(&self) -> &str;

    /// Run every task of `crew` in order
    async fn run(&self, crew: &Crew) -> Result<CrewOutput>;
}

/// Model parameters for [`LlmCrewEngine`]
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Model name; empty uses the provider default
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens per completion
    pub max_tokens: u32,
    /// Tool-call rounds allowed per task before a final answer is forced
    pub max_tool_rounds: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            temperature: 0.7,
            max_tokens: 1500,
            max_tool_rounds: 5,
        }
    }
}

/// Sequential engine backed by an LLM provider and a tool registry
pub struct LlmCrewEngine {
    provider: Arc<dyn LlmProvider>,
    tools: Arc<ToolRegistry>,
    config: EngineConfig,
}

impl LlmCrewEngine {
    /// Create an engine
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, tools: Arc<ToolRegistry>, config: EngineConfig) -> Self {
        Self {
            provider,
            tools,
            config,
        }
    }

    fn base_request(&self, messages: Vec<Message>) -> CompletionRequest {
        let model = if self.config.model.is_empty() {
            self.provider.default_model().to_string()
        } else {
            self.config.model.clone()
        };
        CompletionRequest::new(model)
            .with_messages(messages)
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens)
    }

    /// Run one task against its context
    pub async fn execute_task(&self, task: &Task, context: &[&TaskOutput]) -> Result<TaskOutput> {
        let mut messages = vec![
            Message::system(task.agent.system_prompt()),
            Message::user(task.prompt(context)),
        ];
        let tool_names = task.effective_tools();

        let raw = if tool_names.is_empty() || !self.provider.supports_tools() {
            if !tool_names.is_empty() {
                warn!(
                    task = %task.name,
                    provider = %self.provider.name(),
                    "Provider has no tool support; running task without tools"
                );
            }
            self.provider
                .complete(self.base_request(messages))
                .await?
                .content
        } else {
            let definitions = self.tools.to_llm_tools(tool_names)?;
            let mut answer = None;

            for round in 0..self.config.max_tool_rounds {
                let request = ToolCompletionRequest::new(
                    self.base_request(messages.clone()),
                    definitions.clone(),
                );
                let response = self.provider.complete_with_tools(request).await?;

                if !response.has_tool_calls() {
                    answer = Some(response.content.unwrap_or_default());
                    break;
                }

                debug!(task = %task.name, round, calls = response.tool_calls.len(), "Tool round");
                messages.push(Message::assistant_tool_calls(
                    response.content.unwrap_or_default(),
                    response.tool_calls.clone(),
                ));
                for call in &response.tool_calls {
                    let result = self.call_tool(task, tool_names, call).await?;
                    messages.push(Message::tool_response(&call.id, result));
                }
            }

            match answer {
                Some(answer) => answer,
                None => {
                    warn!(task = %task.name, rounds = self.config.max_tool_rounds, "Tool rounds exhausted; forcing final answer");
                    let request = ToolCompletionRequest::new(self.base_request(messages), definitions)
                        .with_tool_choice(ToolChoice::None);
                    self.provider
                        .complete_with_tools(request)
                        .await?
                        .content
                        .unwrap_or_default()
                }
            }
        };

        Ok(TaskOutput {
            name: task.name.clone(),
            agent: task.agent.role.clone(),
            raw,
        })
    }

    async fn call_tool(&self, task: &Task, allowed: &[String], call: &ToolCall) -> Result<String> {
        if !allowed.iter().any(|name| name == &call.name) {
            return Err(crewline_tools::Error::PermissionDenied(format!(
                "tool '{}' is not available to task '{}'",
                call.name, task.name
            ))
            .into());
        }

        let input = call.arguments_json()?;
        info!(task = %task.name, tool = %call.name, args = %call.arguments, "Executing tool");
        let output = self.tools.execute(&call.name, input).await?;
        debug!(tool = %call.name, duration_ms = output.duration_ms, "Tool finished");
        Ok(output.text())
    }
}

#[async_trait::async_trait]
impl CrewEngine for LlmCrewEngine {
    fn name(&self) -> &str {
        self.provider.name()
    }

    async fn run(&self, crew: &Crew) -> Result<CrewOutput> {
        let mut outputs: Vec<TaskOutput> = Vec::with_capacity(crew.tasks().len());

        for (index, task) in crew.tasks().iter().enumerate() {
            if crew.verbose() || task.agent.verbose {
                info!(task = %task.name, agent = %task.agent.role, "Task started");
            } else {
                debug!(task = %task.name, agent = %task.agent.role, "Task started");
            }

            let output = {
                let context = crew.context_for(index, &outputs);
                self.execute_task(task, &context).await?
            };

            info!(task = %task.name, chars = output.raw.len(), "Task finished");
            outputs.push(output);
        }

        if outputs.is_empty() {
            return Err(Error::InvalidCrew("crew produced no output".to_string()));
        }
        Ok(CrewOutput::from_tasks(outputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Agent;
    use crewline_llm::{MockProvider, ToolCompletionResponse};
    use crewline_tools::{Tool, ToolDefinition, ToolOutput};
    use std::time::Instant;

    struct UpperTool {
        definition: ToolDefinition,
    }

    impl UpperTool {
        fn new() -> Self {
            Self {
                definition: ToolDefinition::new("upper", "Uppercase the text"),
            }
        }
    }

    #[async_trait::async_trait]
    impl Tool for UpperTool {
        fn definition(&self) -> &ToolDefinition {
            &self.definition
        }

        async fn execute(&self, input: serde_json::Value) -> crewline_tools::Result<ToolOutput> {
            let text = input["text"].as_str().unwrap_or("").to_uppercase();
            Ok(ToolOutput::new(vec![text], Instant::now()))
        }
    }

    fn call(name: &str, args: &str) -> ToolCall {
        ToolCall {
            id: format!("call_{name}"),
            name: name.to_string(),
            arguments: args.to_string(),
        }
    }

    fn engine(mock: &MockProvider, max_tool_rounds: usize) -> LlmCrewEngine {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(UpperTool::new()));
        LlmCrewEngine::new(
            Arc::new(mock.clone()),
            Arc::new(registry),
            EngineConfig {
                max_tool_rounds,
                ..EngineConfig::default()
            },
        )
    }

    fn crew_with_tools(tools: &[&str]) -> Crew {
        let agent = Arc::new(Agent::new("Helper", "Help", "Helps"));
        let task = Task::new("only", "Shout hello", "Loud text", agent.clone())
            .with_tools(tools.iter().copied());
        Crew::new(vec![agent], vec![task]).unwrap()
    }

    #[tokio::test]
    async fn test_passes_previous_output() {
        let mock = MockProvider::new();
        mock.push_text("outline");
        mock.push_text("article");

        let agent = Arc::new(Agent::new("Writer", "Write", "Writes"));
        let crew = Crew::new(
            vec![agent.clone()],
            vec![
                Task::new("plan", "Plan", "Outline", agent.clone()),
                Task::new("write", "Write", "Article", agent.clone()),
            ],
        )
        .unwrap();

        let out = engine(&mock, 3).run(&crew).await.unwrap();
        assert_eq!(out.raw, "article");

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        assert!(!requests[0].messages[1].content.contains("outline"));
        assert!(requests[1].messages[1].content.ends_with("outline"));
        assert_eq!(requests[0].model, "mock-model");
        assert_eq!(requests[0].temperature, Some(0.7));
    }

    #[tokio::test]
    async fn test_tool_call_round_trip() {
        let mock = MockProvider::new();
        mock.push_response(ToolCompletionResponse::calls(vec![call("upper", r#"{"text":"hello"}"#)]));
        mock.push_text("HELLO it is");

        let out = engine(&mock, 3).run(&crew_with_tools(&["upper"])).await.unwrap();
        assert_eq!(out.raw, "HELLO it is");

        let second = &mock.requests()[1];
        let tool_msg = second.messages.last().unwrap();
        assert_eq!(tool_msg.tool_call_id.as_deref(), Some("call_upper"));
        assert_eq!(tool_msg.content, "HELLO");
    }

    #[tokio::test]
    async fn test_disallowed_tool_is_an_error() {
        let mock = MockProvider::new();
        mock.push_response(ToolCompletionResponse::calls(vec![call("upper", "{}")]));

        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(UpperTool::new()));
        let mut other = UpperTool::new();
        other.definition = ToolDefinition::new("lower", "Lowercase");
        registry.register(Arc::new(other));
        let engine = LlmCrewEngine::new(Arc::new(mock.clone()), Arc::new(registry), EngineConfig::default());

        let err = engine.run(&crew_with_tools(&["lower"])).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Tool(crewline_tools::Error::PermissionDenied(_))
        ));
    }

    #[tokio::test]
    async fn test_forced_answer_after_rounds() {
        let mock = MockProvider::new();
        mock.push_response(ToolCompletionResponse::calls(vec![call("upper", "{}")]));
        mock.push_text("final");

        let out = engine(&mock, 1).run(&crew_with_tools(&["upper"])).await.unwrap();
        assert_eq!(out.raw, "final");
        assert_eq!(mock.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_llm_error_propagates() {
        let mock = MockProvider::new();
        let err = engine(&mock, 2).run(&crew_with_tools(&["upper"])).await.unwrap_err();
        assert!(matches!(err, Error::Llm(crewline_llm::Error::Exhausted)));
    }

    #[tokio::test]
    async fn test_unknown_tool_name_fails_before_model_call() {
        let mock = MockProvider::new();
        let err = engine(&mock, 2).run(&crew_with_tools(&["missing"])).await.unwrap_err();
        assert!(matches!(err, Error::Tool(crewline_tools::Error::NotFound(_))));
        assert!(mock.requests().is_empty());
    }
}
