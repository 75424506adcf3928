//! Minimal chat client for a local Ollama endpoint.
//!
//! This is deliberately a thin wrapper over `/api/chat` - the model runtime
//! itself is external. Tool calling follows Ollama's function-call message
//! shape so the demo commands can forward MCP tools to the model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "qwen2.5:1.5b";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("failed to reach the chat endpoint: {0}. Make sure Ollama is running.")]
    Request(#[from] reqwest::Error),
    #[error("chat endpoint returned {status}: {body}")]
    Api { status: reqwest::StatusCode, body: String },
    #[error("failed to parse chat response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One turn of the conversation, in Ollama's message shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".into(), content: content.into(), tool_calls: None }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".into(), content: content.into(), tool_calls: None }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".into(), content: content.into(), tool_calls: None }
    }

    pub fn tool(content: impl Into<String>) -> Self {
        Self { role: "tool".into(), content: content.into(), tool_calls: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub function: ToolCallFunction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallFunction {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// A function made available to the model.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: ToolFunction,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolFunction {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

impl ToolSpec {
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            kind: "function".into(),
            function: ToolFunction {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolSpec]>,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

/// Chat client for a local Ollama endpoint.
pub struct OllamaClient {
    client: reqwest::Client,
    model: String,
    base_url: String,
}

impl OllamaClient {
    pub fn new(model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), model: model.into(), base_url: base_url.into() }
    }

    /// Create from environment variables.
    ///
    /// Reads `OLLAMA_MODEL` and `OLLAMA_BASE_URL`, with the demo defaults
    /// when unset. An explicit model argument overrides both.
    pub fn from_env(model: Option<String>) -> Self {
        let model = model
            .or_else(|| std::env::var("OLLAMA_MODEL").ok())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("OLLAMA_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(model, base_url)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One non-streaming chat completion.
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[ToolSpec]>,
    ) -> Result<ChatMessage, LlmError> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest { model: &self.model, messages, stream: false, tools };

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Api { status, body });
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)?;
        Ok(parsed.message)
    }
}
