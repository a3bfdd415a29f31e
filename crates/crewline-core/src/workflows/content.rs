//! Content creation: plan, write, edit

use crate::agent::Agent;
use crate::crew::Crew;
use crate::error::Result;
use crate::task::Task;
use crate::template::{inputs, Inputs};
use std::sync::Arc;

/// Planner, writer and editor
#[derive(Debug, Clone)]
pub struct ContentAgents {
    /// Content Planner
    pub planner: Arc<Agent>,
    /// Content Writer
    pub writer: Arc<Agent>,
    /// Editor
    pub editor: Arc<Agent>,
}

impl ContentAgents {
    /// Crew members in task order
    #[must_use]
    pub fn members(&self) -> Vec<Arc<Agent>> {
        vec![
            Arc::clone(&self.planner),
            Arc::clone(&self.writer),
            Arc::clone(&self.editor),
        ]
    }
}

/// Build the content agents
#[must_use]
pub fn content_agents() -> ContentAgents {
    let planner = Agent::new(
        "Content Planner",
        "Plan engaging and factually accurate content on {topic}",
        "You're working on planning a blog article about the topic: {topic}. \
         You collect information that helps the audience learn something \
         and make informed decisions. \
         Your work is the basis for the Content Writer to write an article on this topic.",
    )
    .with_verbose(true);

    let writer = Agent::new(
        "Content Writer",
        "Write insightful and factually accurate opinion piece about the topic: {topic}",
        "You're working on a writing a new opinion piece about the topic: {topic}. \
         You base your writing on the work of the Content Planner, who provides an outline \
         and relevant context about the topic. \
         You follow the main objectives and direction of the outline, \
         as provide by the Content Planner. \
         You also provide objective and impartial insights \
         and back them up with information provide by the Content Planner. \
         You acknowledge in your opinion piece when your statements are opinions \
         as opposed to objective statements.",
    )
    .with_verbose(true);

    let editor = Agent::new(
        "Editor",
        "Edit a given blog post to align with the writing style of the organization.",
        "You are an editor who receives a blog post from the Content Writer. \
         Your goal is to review the blog post to ensure that it follows journalistic best practices, \
         provides balanced viewpoints when providing opinions or assertions, \
         and also avoids major controversial topics or opinions when possible.",
    )
    .with_verbose(true);

    ContentAgents {
        planner: Arc::new(planner),
        writer: Arc::new(writer),
        editor: Arc::new(editor),
    }
}

/// `plan -> write -> edit`
#[must_use]
pub fn content_tasks(agents: &ContentAgents) -> Vec<Task> {
    let plan = Task::new(
        "plan",
        "1. Prioritize the latest trends, key players, and noteworthy news on {topic}.\n\
         2. Identify the target audience, considering their interests and pain points.\n\
         3. Develop a detailed content outline including an introduction, key points, and a call to action.\n\
         4. Include SEO keywords and relevant data or sources.",
        "A comprehensive content plan document with an outline, audience analysis, \
         SEO keywords, and resources.",
        Arc::clone(&agents.planner),
    );

    let write = Task::new(
        "write",
        "1. Use the content plan to craft a compelling blog post on {topic}.\n\
         2. Incorporate SEO keywords naturally.\n\
         3. Sections/Subtitles are properly named in an engaging manner.\n\
         4. Ensure the post is structured with an engaging introduction, insightful body, \
         and a summarizing conclusion.\n\
         5. Proofread for grammatical errors and alignment with the brand's voice.\n",
        "A well-written blog post in markdown format, ready for publication, \
         each section should have 2 or 3 paragraphs.",
        Arc::clone(&agents.writer),
    )
    .with_context(["plan"]);

    let edit = Task::new(
        "edit",
        "Proofread the given blog post for grammatical errors and alignment with the brand's voice.",
        "A well-written blog post in markdown format, ready for publication, \
         each section should have 2 or 3 paragraphs.",
        Arc::clone(&agents.editor),
    )
    .with_context(["write"]);

    vec![plan, write, edit]
}

/// Assemble the content crew
pub fn content_crew() -> Result<Crew> {
    let agents = content_agents();
    let tasks = content_tasks(&agents);
    Crew::new(agents.members(), tasks)
}

/// Kickoff inputs for a topic
#[must_use]
pub fn content_inputs(topic: &str) -> Inputs {
    inputs([("topic", topic)])
}
