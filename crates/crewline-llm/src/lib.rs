//! Crewline LLM - LLM Provider Abstraction
//!
//! This crate provides the model side of a crew run:
//! - Provider: the `LlmProvider` trait every backend implements
//! - OpenAI-compatible: one HTTP provider speaking `/chat/completions`
//! - Presets: OpenAI, Mistral, Cohere and HuggingFace endpoints
//! - Mock: queued responses for tests

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod completion;
pub mod error;
pub mod message;
pub mod mock;
pub mod openai_compat;
pub mod presets;
pub mod provider;
pub mod tools;
pub mod util;

pub use completion::{
    CompletionRequest, CompletionResponse, TokenUsage, ToolCompletionRequest,
    ToolCompletionResponse,
};
pub use error::{Error, Result};
pub use message::{Message, MessageRole};
pub use mock::MockProvider;
pub use openai_compat::{OpenAiCompatConfig, OpenAiCompatProvider};
pub use presets::ProviderKind;
pub use provider::LlmProvider;
pub use tools::{ToolCall, ToolChoice, ToolDefinition};
