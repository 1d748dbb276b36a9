//! Chat-completion service client.
//!
//! Thin async client for an OpenAI-style `/chat/completions` endpoint.
//! Only the contract the resolver depends on is modeled: a message list
//! in, the reply message's content string out, with the reply constrained
//! to a JSON object.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ServiceError;

/// One chat message. Every message the resolver sends is a user turn.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionReply {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    content: Option<String>,
}

/// Client for the text-understanding service.
pub struct ChatClient {
    http: Client,
    api_base: String,
    api_key: String,
}

impl ChatClient {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Send `messages` to `model`, demanding a JSON-object reply, and
    /// return the reply content verbatim (trimmed).
    ///
    /// # Errors
    ///
    /// Fails on a missing credential, transport errors, non-success
    /// statuses, and replies without message content. Never retries.
    pub async fn complete_json(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, ServiceError> {
        if self.api_key.is_empty() {
            return Err(ServiceError::MissingApiKey);
        }

        let body = json!({
            "model": model,
            "response_format": { "type": "json_object" },
            "messages": messages,
        });

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Status { status, body });
        }

        let reply: ChatCompletionReply = resp.json().await?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or(ServiceError::MissingContent)
    }
}
