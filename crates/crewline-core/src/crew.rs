//! Crew - agents plus an ordered task list
//!
//! A crew is validated once at construction. At kickoff its text is
//! rendered from the inputs and the rendered crew is handed to an engine.

use crate::agent::Agent;
use crate::engine::CrewEngine;
use crate::error::{Error, Result};
use crate::task::{Task, TaskOutput};
use crate::template::Inputs;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Assembled crew
#[derive(Debug, Clone)]
pub struct Crew {
    agents: Vec<Arc<Agent>>,
    tasks: Vec<Task>,
    verbose: bool,
}

impl Crew {
    /// Assemble a crew
    ///
    /// Fails when there are no tasks, task names repeat, a task's agent is
    /// not one of `agents`, or a context entry names an unknown or later task.
    pub fn new(agents: Vec<Arc<Agent>>, tasks: Vec<Task>) -> Result<Self> {
        if tasks.is_empty() {
            return Err(Error::InvalidCrew("a crew needs at least one task".to_string()));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for task in &tasks {
            if !agents.iter().any(|a| Arc::ptr_eq(a, &task.agent)) {
                return Err(Error::InvalidCrew(format!(
                    "task '{}' is assigned to '{}', which is not a crew member",
                    task.name, task.agent.role
                )));
            }
            if let Some(missing) = task.context.iter().find(|c| !seen.contains(c.as_str())) {
                return Err(Error::InvalidCrew(format!(
                    "task '{}' reads context from '{missing}', which does not run before it",
                    task.name
                )));
            }
            if !seen.insert(&task.name) {
                return Err(Error::InvalidCrew(format!(
                    "duplicate task name '{}'",
                    task.name
                )));
            }
        }

        Ok(Self {
            agents,
            tasks,
            verbose: false,
        })
    }

    /// Set verbosity
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Crew members
    #[must_use]
    pub fn agents(&self) -> &[Arc<Agent>] {
        &self.agents
    }

    /// Tasks in execution order
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Whether the crew logs each step
    #[must_use]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Task names in execution order
    #[must_use]
    pub fn task_names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name.as_str()).collect()
    }

    /// Placeholder-free copy of this crew
    ///
    /// Each agent is rendered once; tasks sharing an agent share the
    /// rendered copy.
    pub fn render(&self, inputs: &Inputs) -> Result<Self> {
        let agents = self
            .agents
            .iter()
            .map(|a| a.render(inputs).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        let tasks = self
            .tasks
            .iter()
            .map(|task| {
                let idx = self
                    .agents
                    .iter()
                    .position(|a| Arc::ptr_eq(a, &task.agent))
                    .ok_or_else(|| Error::InvalidCrew(format!("task '{}' lost its agent", task.name)))?;
                task.render(inputs, Arc::clone(&agents[idx]))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            agents,
            tasks,
            verbose: self.verbose,
        })
    }

    /// Outputs task `index` reads, given the outputs produced so far
    ///
    /// Explicit context wins; without it the previous task's output is used.
    #[must_use]
    pub fn context_for<'a>(&self, index: usize, outputs: &'a [TaskOutput]) -> Vec<&'a TaskOutput> {
        let task = &self.tasks[index];
        if task.context.is_empty() {
            return index
                .checked_sub(1)
                .and_then(|prev| outputs.get(prev))
                .into_iter()
                .collect();
        }
        task.context
            .iter()
            .filter_map(|name| outputs.iter().find(|o| &o.name == name))
            .collect()
    }

    /// Render with `inputs` and run on `engine`
    pub async fn kickoff(&self, engine: &dyn CrewEngine, inputs: &Inputs) -> Result<CrewOutput> {
        let rendered = self.render(inputs)?;
        info!(tasks = rendered.tasks.len(), engine = engine.name(), "Crew kickoff");
        engine.run(&rendered).await
    }
}

/// Result of a crew run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewOutput {
    /// Final task's answer
    pub raw: String,
    /// Every task's output, in execution order
    pub tasks_output: Vec<TaskOutput>,
}

impl CrewOutput {
    /// Build from task outputs; the last one is the crew's answer
    #[must_use]
    pub fn from_tasks(tasks_output: Vec<TaskOutput>) -> Self {
        let raw = tasks_output
            .last()
            .map(|o| o.raw.clone())
            .unwrap_or_default();
        Self { raw, tasks_output }
    }
}

impl fmt::Display for CrewOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
