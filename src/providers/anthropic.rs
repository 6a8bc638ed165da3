//! Anthropic messages client. Credential in `x-api-key`, pinned API version
//! header, system prompt as a top-level field rather than a message.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{AnthropicConfig, RequestConfig};
use crate::error::{GatewayError, Result};
use crate::models::{ChatMessage, CompletionRequest};
use crate::prompt;

use super::{CompletionClient, http_client, map_send_error, reject_error_status};

const PROVIDER: &str = "anthropic";
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

// Non-text blocks deserialize with `text: None` and are skipped.
#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicClient {
    pub fn new(config: &AnthropicConfig, request: &RequestConfig) -> Result<Self> {
        let timeout = request.timeout();
        Ok(Self {
            client: http_client(PROVIDER, timeout)?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            timeout,
        })
    }

    fn credential(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(GatewayError::MissingCredential { provider: PROVIDER })
    }
}

/// History plus the new input, without the system turn: Anthropic takes the
/// system prompt as a separate top-level field.
fn conversation_messages(request: &CompletionRequest) -> Vec<ChatMessage> {
    prompt::chat_messages(&request.system_prompt, &request.history, &request.user_input)
        .into_iter()
        .filter(|m| m.role != "system")
        .collect()
}

fn extract_text(response: MessagesResponse) -> Result<String> {
    let text = response
        .content
        .into_iter()
        .find_map(|block| block.text.filter(|t| !t.trim().is_empty()));
    text.ok_or(GatewayError::MalformedResponse {
        provider: PROVIDER,
        detail: "no text content block".to_string(),
    })
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let api_key = self.credential()?;

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: &request.system_prompt,
            messages: conversation_messages(request),
        };

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| map_send_error(PROVIDER, self.timeout, e))?;

        let response = reject_error_status(PROVIDER, response).await?;

        let envelope: MessagesResponse =
            response.json().await.map_err(|e| GatewayError::MalformedResponse {
                provider: PROVIDER,
                detail: format!("invalid JSON envelope: {e}"),
            })?;

        extract_text(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConversationTurn;

    #[test]
    fn test_system_turn_excluded_from_messages() {
        let request = CompletionRequest::new(
            "Be Alex.",
            "how are you?",
            &[
                ConversationTurn::user("hi"),
                ConversationTurn::assistant("Hello!"),
            ],
        );

        let messages = conversation_messages(&request);
        assert_eq!(messages.len(), 3);
        assert!(messages.iter().all(|m| m.role != "system"));
        assert_eq!(messages[0].content, "hi");
        assert_eq!(messages[1].content, "Hello!");
        assert_eq!(messages[2].content, "how are you?");
    }

    #[test]
    fn test_extract_text_skips_non_text_blocks() {
        let envelope: MessagesResponse = serde_json::from_str(
            r#"{"content": [{"type": "tool_use"}, {"type": "text", "text": "Hi Sam!"}]}"#,
        )
        .expect("valid envelope");
        assert_eq!(extract_text(envelope).expect("text present"), "Hi Sam!");
    }

    #[test]
    fn test_empty_content_is_malformed() {
        let envelope: MessagesResponse =
            serde_json::from_str(r#"{"content": []}"#).expect("valid envelope");
        assert!(matches!(
            extract_text(envelope),
            Err(GatewayError::MalformedResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_credential_short_circuits() {
        let config = AnthropicConfig {
            api_key: None,
            base_url: "https://api.anthropic.com/v1".to_string(),
            model: "claude-3-haiku-20240307".to_string(),
        };
        let request_cfg = RequestConfig {
            timeout_seconds: 5,
            max_tokens: 150,
            temperature: 0.7,
            top_p: 0.9,
        };
        let client = AnthropicClient::new(&config, &request_cfg).expect("client should build");

        let result = client
            .complete(&CompletionRequest::new("sys", "hi", &[]))
            .await;
        assert!(matches!(
            result,
            Err(GatewayError::MissingCredential { provider: "anthropic" })
        ));
    }
}
