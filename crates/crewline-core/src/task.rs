//! Task descriptors and their outputs

use crate::agent::Agent;
use crate::error::Result;
use crate::template::{render, Inputs};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// One unit of work assigned to an agent
#[derive(Debug, Clone)]
pub struct Task {
    /// Name, unique within a crew
    pub name: String,
    /// What to do; may contain `{placeholders}`
    pub description: String,
    /// What a good answer looks like
    pub expected_output: String,
    /// Assigned agent
    pub agent: Arc<Agent>,
    /// Task-level tools; when set, the agent uses exactly these
    pub tools: Option<Vec<String>>,
    /// Names of earlier tasks whose outputs this task reads
    pub context: Vec<String>,
}

impl Task {
    /// Create a task with no tool override and no explicit context
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        expected_output: impl Into<String>,
        agent: Arc<Agent>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            expected_output: expected_output.into(),
            agent,
            tools: None,
            context: Vec::new(),
        }
    }

    /// Restrict the agent to exactly these tools for this task
    #[must_use]
    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools = Some(tools.into_iter().map(Into::into).collect());
        self
    }

    /// Name the tasks whose outputs this task consumes
    #[must_use]
    pub fn with_context<I, S>(mut self, tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.context = tasks.into_iter().map(Into::into).collect();
        self
    }

    /// Tools available while running this task
    #[must_use]
    pub fn effective_tools(&self) -> &[String] {
        self.tools.as_deref().unwrap_or(&self.agent.tools)
    }

    /// A copy with description and expected output rendered, bound to `agent`
    pub fn render(&self, inputs: &Inputs, agent: Arc<Agent>) -> Result<Self> {
        Ok(Self {
            description: render(&self.description, inputs)?,
            expected_output: render(&self.expected_output, inputs)?,
            agent,
            ..self.clone()
        })
    }

    /// User prompt for this task, with prior outputs appended as context
    #[must_use]
    pub fn prompt(&self, context: &[&TaskOutput]) -> String {
        let mut prompt = format!(
            "{}\n\nThis is the expected criteria for your final answer: {}\n\
             You MUST return the actual complete content as the final answer, not a summary.",
            self.description, self.expected_output
        );

        if !context.is_empty() {
            prompt.push_str("\n\nThis is the context you're working with:\n");
            let joined = context
                .iter()
                .map(|o| o.raw.as_str())
                .collect::<Vec<_>>()
                .join("\n\n----------\n\n");
            prompt.push_str(&joined);
        }

        prompt
    }
}

/// Result of one task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutput {
    /// Task name
    pub name: String,
    /// Role of the agent that produced it
    pub agent: String,
    /// Final answer text
    pub raw: String,
}

impl fmt::Display for TaskOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> Arc<Agent> {
        Arc::new(Agent::new("Writer", "Write", "Writes").with_tools(["search_the_internet"]))
    }

    #[test]
    fn test_task_tools_override_agent_tools() {
        let task = Task::new("write", "Write", "A post", agent());
        assert_eq!(task.effective_tools(), ["search_the_internet"]);

        let task = task.with_tools(["read_support_docs"]);
        assert_eq!(task.effective_tools(), ["read_support_docs"]);

        let none: [&str; 0] = [];
        let task = Task::new("gather", "Gather", "Info", agent()).with_tools(none);
        assert!(task.effective_tools().is_empty());
    }

    #[test]
    fn test_prompt_with_context() {
        let task = Task::new("edit", "Proofread the post.", "A clean post", agent());
        assert!(!task.prompt(&[]).contains("context"));

        let previous = TaskOutput {
            name: "write".to_string(),
            agent: "Writer".to_string(),
            raw: "# Draft".to_string(),
        };
        let prompt = task.prompt(&[&previous]);
        assert!(prompt.starts_with("Proofread the post."));
        assert!(prompt.contains("final answer: A clean post"));
        assert!(prompt.ends_with("# Draft"));
    }

    #[test]
    fn test_render() {
        let task = Task::new("plan", "Research {topic}", "A plan for {topic}", agent());
        let rendered = task
            .render(&crate::template::inputs([("topic", "Biotechnology")]), agent())
            .unwrap();
        assert_eq!(rendered.description, "Research Biotechnology");
        assert_eq!(rendered.expected_output, "A plan for Biotechnology");
    }
}
