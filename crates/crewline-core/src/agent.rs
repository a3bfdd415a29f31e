//! Agent personas

use crate::error::Result;
use crate::template::{render, Inputs};
use serde::{Deserialize, Serialize};

/// An agent persona: who it is, what it wants, where it comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Role, e.g. "Content Planner"
    pub role: String,
    /// Personal goal
    pub goal: String,
    /// Background story
    pub backstory: String,
    /// Whether the agent may hand work to other agents
    #[serde(default)]
    pub allow_delegation: bool,
    /// Whether the agent's steps are logged at info level
    #[serde(default)]
    pub verbose: bool,
    /// Tools the agent may use on any task without its own tool list
    #[serde(default)]
    pub tools: Vec<String>,
}

impl Agent {
    /// Create an agent with no tools and delegation disabled
    #[must_use]
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
            allow_delegation: false,
            verbose: false,
            tools: Vec::new(),
        }
    }

    /// Allow or forbid delegation
    #[must_use]
    pub fn with_delegation(mut self, allow: bool) -> Self {
        self.allow_delegation = allow;
        self
    }

    /// Set verbosity
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the agent-level tools
    #[must_use]
    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools = tools.into_iter().map(Into::into).collect();
        self
    }

    /// A copy with placeholders in role, goal and backstory substituted
    pub fn render(&self, inputs: &Inputs) -> Result<Self> {
        Ok(Self {
            role: render(&self.role, inputs)?,
            goal: render(&self.goal, inputs)?,
            backstory: render(&self.backstory, inputs)?,
            ..self.clone()
        })
    }

    /// System prompt presented to the model
    #[must_use]
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}. {}\nYour personal goal is: {}",
            self.role, self.backstory, self.goal
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::inputs;

    #[test]
    fn test_builder_defaults() {
        let agent = Agent::new("Editor", "Edit posts", "You edit.");
        assert!(!agent.allow_delegation);
        assert!(!agent.verbose);
        assert!(agent.tools.is_empty());

        let agent = agent.with_verbose(true).with_tools(["search_the_internet"]);
        assert!(agent.verbose);
        assert_eq!(agent.tools, vec!["search_the_internet"]);
    }

    #[test]
    fn test_render_and_prompt() {
        let agent = Agent::new(
            "Content Planner",
            "Plan content on {topic}",
            "You plan articles about {topic}.",
        );
        let rendered = agent
            .render(&inputs([("topic", "Blockchain")]))
            .unwrap();
        assert_eq!(rendered.goal, "Plan content on Blockchain");
        assert!(rendered
            .system_prompt()
            .starts_with("You are Content Planner. You plan articles about Blockchain."));
        assert!(agent.render(&Inputs::new()).is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let agent: Agent = serde_json::from_value(serde_json::json!({
            "role": "Editor",
            "goal": "Edit",
            "backstory": "Edits"
        }))
        .unwrap();
        assert!(!agent.allow_delegation);
        assert!(agent.tools.is_empty());
    }
}
