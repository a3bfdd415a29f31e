//! Mock LLM Provider for testing
//!
//! Returns queued responses in order and records every request it receives.

use crate::completion::{
    CompletionRequest, CompletionResponse, ToolCompletionRequest, ToolCompletionResponse,
};
use crate::error::{Error, Result};
use crate::provider::LlmProvider;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A mock LLM provider that returns queued responses.
///
/// When the queue is empty, `complete` echoes a fixed text and
/// `complete_with_tools` fails with [`Error::Exhausted`].
#[derive(Clone, Default)]
pub struct MockProvider {
    responses: Arc<Mutex<VecDeque<ToolCompletionResponse>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a plain text answer.
    pub fn push_text(&self, content: impl Into<String>) {
        self.push_response(ToolCompletionResponse::text(content));
    }

    /// Queue a full response.
    pub fn push_response(&self, response: ToolCompletionResponse) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(response);
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn record(&self, request: CompletionRequest) {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);
    }

    fn next_response(&self) -> Option<ToolCompletionResponse> {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
    }
}

#[async_trait::async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn supports_tools(&self) -> bool {
        true
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.record(request);
        let content = self
            .next_response()
            .and_then(|r| r.content)
            .unwrap_or_else(|| "mock response".to_string());
        Ok(CompletionResponse {
            content,
            usage: None,
            finish_reason: Some("stop".to_string()),
            model: "mock-model".to_string(),
        })
    }

    async fn complete_with_tools(
        &self,
        request: ToolCompletionRequest,
    ) -> Result<ToolCompletionResponse> {
        self.record(request.request);
        self.next_response().ok_or(Error::Exhausted)
    }
}
