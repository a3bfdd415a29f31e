//! Error types for crewline-core

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// A `{placeholder}` had no value in the crew inputs
    #[error("missing input for placeholder '{{{name}}}'")]
    MissingInput {
        /// Placeholder name
        name: String,
    },

    /// Unknown topic category or index past the end of the category
    #[error("no topic at index {index} in category '{category}'")]
    TopicIndex {
        /// Requested category
        category: String,
        /// Requested index
        index: usize,
    },

    /// Crew assembly rejected the agents/tasks
    #[error("invalid crew: {0}")]
    InvalidCrew(String),

    /// LLM provider error
    #[error("llm error: {0}")]
    Llm(#[from] crewline_llm::Error),

    /// Tool execution error
    #[error("tool error: {0}")]
    Tool(#[from] crewline_tools::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::MissingInput {
            name: "topic".to_string(),
        };
        assert_eq!(err.to_string(), "missing input for placeholder '{topic}'");

        let err: Error = crewline_tools::Error::Validation("bad".to_string()).into();
        assert!(matches!(err, Error::Tool(_)));
    }
}
