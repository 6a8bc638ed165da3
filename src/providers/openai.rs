//! OpenAI chat completions client. Bearer credential, role-tagged messages,
//! `choices[0].message.content` envelope.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{OpenAiConfig, RequestConfig};
use crate::error::{GatewayError, Result};
use crate::models::{ChatMessage, CompletionRequest};
use crate::prompt;

use super::{CompletionClient, http_client, map_send_error, reject_error_status};

const PROVIDER: &str = "openai";

pub struct OpenAiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig, request: &RequestConfig) -> Result<Self> {
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

fn extract_text(response: ChatCompletionResponse) -> Result<String> {
    let text = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(GatewayError::MalformedResponse {
            provider: PROVIDER,
            detail: "no choices with content".to_string(),
        });
    }
    Ok(text)
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let api_key = self.credential()?;

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: prompt::chat_messages(
                &request.system_prompt,
                &request.history,
                &request.user_input,
            ),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&body)
            .send()
            .await
            .map_err(|e| map_send_error(PROVIDER, self.timeout, e))?;

        let response = reject_error_status(PROVIDER, response).await?;

        let envelope: ChatCompletionResponse =
            response.json().await.map_err(|e| GatewayError::MalformedResponse {
                provider: PROVIDER,
                detail: format!("invalid JSON envelope: {e}"),
            })?;

        extract_text(envelope)
    }
}
