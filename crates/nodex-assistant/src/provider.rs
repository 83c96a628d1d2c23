//! Provider wire formats: endpoints, headers, request bodies and stream deltas.

use nodex_core::{AssistantConfig, ProviderKind};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

/// Speaker of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

pub fn endpoint(provider: ProviderKind) -> &'static str {
    match provider {
        ProviderKind::Anthropic => ANTHROPIC_API_URL,
        ProviderKind::OpenAi => OPENAI_API_URL,
    }
}

/// Configured model, or the provider default
pub fn model_for(config: &AssistantConfig) -> &str {
    match (&config.model, config.provider) {
        (Some(model), _) if !model.trim().is_empty() => model.as_str(),
        (_, ProviderKind::Anthropic) => DEFAULT_ANTHROPIC_MODEL,
        (_, ProviderKind::OpenAi) => DEFAULT_OPENAI_MODEL,
    }
}

/// Authentication and versioning headers for a request
pub fn headers(provider: ProviderKind, api_key: &str) -> Vec<(&'static str, String)> {
    match provider {
        ProviderKind::Anthropic => vec![
            ("x-api-key", api_key.to_string()),
            ("anthropic-version", ANTHROPIC_VERSION.to_string()),
        ],
        ProviderKind::OpenAi => vec![("authorization", format!("Bearer {}", api_key))],
    }
}

/// Streaming request body.
///
/// Anthropic carries the system prompt in its own field; OpenAI expects it as
/// the first message.
pub fn request_body(config: &AssistantConfig, system: &str, messages: &[ChatMessage]) -> Value {
    let model = model_for(config);
    match config.provider {
        ProviderKind::Anthropic => json!({
            "model": model,
            "max_tokens": config.max_tokens,
            "system": system,
            "messages": messages,
            "stream": true,
        }),
        ProviderKind::OpenAi => {
            let mut all = Vec::with_capacity(messages.len() + 1);
            all.push(json!({"role": "system", "content": system}));
            all.extend(messages.iter().map(|m| json!({"role": m.role, "content": m.content})));
            json!({
                "model": model,
                "messages": all,
                "stream": true,
            })
        }
    }
}

/// Text fragment carried by one decoded stream event, if any
pub fn extract_delta(provider: ProviderKind, event: &Value) -> Option<String> {
    let text = match provider {
        ProviderKind::Anthropic => {
            if event.get("type").and_then(Value::as_str) != Some("content_block_delta") {
                return None;
            }
            event.pointer("/delta/text")
        }
        ProviderKind::OpenAi => event.pointer("/choices/0/delta/content"),
    }?;
    text.as_str().filter(|t| !t.is_empty()).map(str::to_string)
}

/// Message of a provider error body, with a generic fallback
pub fn error_message(body: Option<&Value>) -> String {
    body.and_then(|b| b.pointer("/error/message"))
        .and_then(Value::as_str)
        .unwrap_or("API request failed")
        .to_string()
}
