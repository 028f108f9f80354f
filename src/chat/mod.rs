//! Chat-completions client backing the assistant endpoint.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::OpenAiConfig;
use crate::errors::AppError;

const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.7;

/// One chat turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }
}

/// Assistant reply plus the provider's token accounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub usage: Option<Value>,
}

/// Build the fixed assistant prompt, embedding the caller's search context when given.
pub fn system_prompt(context: Option<&Value>) -> String {
    let context_block = match context {
        Some(ctx) if !ctx.is_null() => format!(
            "Current search context:\n{}",
            serde_json::to_string_pretty(ctx).unwrap_or_default()
        ),
        _ => String::new(),
    };

    format!(
        "You are StorySearch AI, an intelligent assistant that helps users discover and understand \
information about companies, topics, and online content.

You can help with:
- Finding information about companies (e.g., Nike, Tesla, Apple)
- Explaining topics and concepts
- Comparing products, services, or companies
- Providing industry insights and trends
- Answering questions about any online content
- Discovering related information and resources

{}

Always provide helpful, accurate, and up-to-date information. When discussing companies or topics, \
provide comprehensive insights, key facts, and relevant details. Be conversational and helpful.",
        context_block
    )
}

/// User-facing message for an upstream failure status.
pub fn upstream_message(status: StatusCode) -> &'static str {
    match status.as_u16() {
        429 => "AI service is currently busy. Please try again in a few moments.",
        401 => "AI service authentication failed. Please contact support.",
        402 => "AI service quota exceeded. Please contact support.",
        s if s >= 500 => "AI service is experiencing technical difficulties. Please try again later.",
        _ => "AI service temporarily unavailable",
    }
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
    #[serde(default)]
    usage: Option<Value>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: ChatMessage,
}

/// OpenAI chat-completions client.
#[derive(Clone)]
pub struct ChatClient {
    http_client: Client,
    config: OpenAiConfig,
}

impl ChatClient {
    pub fn new(http_client: Client, config: OpenAiConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Send the conversation behind the fixed system prompt.
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        context: Option<&Value>,
    ) -> Result<ChatReply, AppError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("OpenAI API key not configured".into()))?;

        let mut all_messages = Vec::with_capacity(messages.len() + 1);
        all_messages.push(ChatMessage::system(system_prompt(context)));
        all_messages.extend_from_slice(messages);

        let body = json!({
            "model": self.config.model,
            "messages": all_messages,
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
        });

        let response = self
            .http_client
            .post(format!(
                "{}/chat/completions",
                self.config.base_url.trim_end_matches('/')
            ))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(%status, error = %error_text, "OpenAI API error");
            return Err(AppError::Upstream(upstream_message(status).to_string()));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Parse(format!("Invalid completion response: {}", e)))?;

        let reply = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::Upstream("OpenAI returned no choices".into()))?;

        tracing::info!("AI Chat response generated successfully");

        Ok(ChatReply {
            response: reply,
            usage: completion.usage,
        })
    }
}
