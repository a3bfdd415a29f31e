//! OpenAI-compatible chat completions provider
//!
//! Speaks the `/chat/completions` wire format used by OpenAI, Mistral,
//! Cohere's compatibility API and the HuggingFace router.

use crate::completion::{
    CompletionRequest, CompletionResponse, TokenUsage, ToolCompletionRequest,
    ToolCompletionResponse,
};
use crate::error::{Error, Result};
use crate::message::Message;
use crate::presets::ProviderKind;
use crate::provider::LlmProvider;
use crate::tools::{ToolCall, ToolDefinition};
use crate::util::{mask_api_key, sanitize_api_error};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// Provider configuration
#[derive(Clone)]
pub struct OpenAiCompatConfig {
    /// Backend preset
    pub kind: ProviderKind,
    /// API key
    pub api_key: SecretString,
    /// Base URL (without trailing `/chat/completions`)
    pub base_url: String,
    /// Default model
    pub default_model: String,
}

impl fmt::Debug for OpenAiCompatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiCompatConfig")
            .field("kind", &self.kind)
            .field("api_key", &mask_api_key(self.api_key.expose_secret()))
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .finish()
    }
}

impl OpenAiCompatConfig {
    /// Create a configuration from a preset and its key
    #[must_use]
    pub fn new(kind: ProviderKind, api_key: SecretString) -> Self {
        Self {
            kind,
            api_key,
            base_url: kind.base_url().to_string(),
            default_model: kind.default_model().to_string(),
        }
    }

    /// Set the default model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Set a custom base URL (proxies, self-hosted gateways)
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// OpenAI-compatible provider
pub struct OpenAiCompatProvider {
    client: Client,
    config: OpenAiCompatConfig,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ChatTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<ChatToolCall>,
}

#[derive(Serialize)]
struct ChatTool {
    r#type: &'static str,
    function: ChatFunction,
}

#[derive(Serialize)]
struct ChatFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
    #[serde(default)]
    model: String,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ChatToolCall>>,
}

#[derive(Serialize, Deserialize)]
struct ChatToolCall {
    id: String,
    #[serde(default = "function_type")]
    r#type: String,
    function: ChatToolCallFunction,
}

fn function_type() -> String {
    "function".to_string()
}

#[derive(Serialize, Deserialize)]
struct ChatToolCallFunction {
    name: String,
    arguments: String,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl OpenAiCompatProvider {
    /// Create a new provider
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::NotConfigured(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn convert_message(msg: &Message) -> ChatMessage {
        let tool_calls = msg
            .tool_calls
            .iter()
            .map(|tc| ChatToolCall {
                id: tc.id.clone(),
                r#type: function_type(),
                function: ChatToolCallFunction {
                    name: tc.name.clone(),
                    arguments: tc.arguments.clone(),
                },
            })
            .collect::<Vec<_>>();
        let content = if msg.content.is_empty() && !tool_calls.is_empty() {
            None
        } else {
            Some(msg.content.clone())
        };
        ChatMessage {
            role: msg.role.as_str(),
            content,
            tool_call_id: msg.tool_call_id.clone(),
            tool_calls,
        }
    }

    fn convert_tool(tool: &ToolDefinition) -> ChatTool {
        ChatTool {
            r#type: "function",
            function: ChatFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.parameters.clone(),
            },
        }
    }

    fn build_request(
        &self,
        request: &CompletionRequest,
        tools: Option<&ToolCompletionRequest>,
    ) -> ChatRequest {
        let model = if request.model.is_empty() {
            self.config.default_model.clone()
        } else {
            request.model.clone()
        };

        ChatRequest {
            model,
            messages: request.messages.iter().map(Self::convert_message).collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            tools: tools.map(|t| t.tools.iter().map(Self::convert_tool).collect()),
            tool_choice: tools.map(|t| t.tool_choice.as_str()),
        }
    }

    async fn send(&self, chat_request: &ChatRequest) -> Result<ChatResponse> {
        let key_var = self.config.kind.key_var();

        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(chat_request)
            .send()
            .await
            .map_err(|e| Error::Network(sanitize_api_error(&e.to_string(), key_var)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!(
                "{status}: {}",
                sanitize_api_error(&error_text, key_var)
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))
    }

    fn usage(usage: Option<ChatUsage>) -> Option<TokenUsage> {
        usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        })
    }
}

#[async_trait::async_trait]
impl LlmProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        self.config.kind.as_str()
    }

    fn supports_tools(&self) -> bool {
        !matches!(self.config.kind, ProviderKind::HuggingFace)
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(provider = %self.config.kind, model = %request.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let chat_request = self.build_request(&request, None);
        debug!(messages = chat_request.messages.len(), "Sending completion request");

        let chat_response = self.send(&chat_request).await?;
        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidResponse("No choices in response".to_string()))?;

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            usage: Self::usage(chat_response.usage),
            finish_reason: choice.finish_reason,
            model: chat_response.model,
        })
    }

    #[instrument(skip(self, request), fields(provider = %self.config.kind, tools = request.tools.len()))]
    async fn complete_with_tools(
        &self,
        request: ToolCompletionRequest,
    ) -> Result<ToolCompletionResponse> {
        let chat_request = self.build_request(&request.request, Some(&request));
        debug!(messages = chat_request.messages.len(), "Sending tool completion request");

        let chat_response = self.send(&chat_request).await?;
        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidResponse("No choices in response".to_string()))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| ToolCall {
                id: tc.id,
                name: tc.function.name,
                arguments: tc.function.arguments,
            })
            .collect();

        Ok(ToolCompletionResponse {
            content: choice.message.content,
            tool_calls,
            usage: Self::usage(chat_response.usage),
            finish_reason: choice.finish_reason,
            model: chat_response.model,
        })
    }
}
