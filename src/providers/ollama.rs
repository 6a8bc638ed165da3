//! Local inference over Ollama's generate endpoint. No credential; the
//! prompt is a raw transcript because the endpoint is not chat-shaped.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{OllamaConfig, RequestConfig};
use crate::error::{GatewayError, Result};
use crate::models::CompletionRequest;
use crate::prompt;

use super::{CompletionClient, http_client, map_send_error, reject_error_status};

const PROVIDER: &str = "ollama";

// The persona speaks as Alex, so the transcript labels the learner "Child".
const USER_LABEL: &str = "Child";
const ASSISTANT_LABEL: &str = "Alex";

pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    options: GenerateOptions,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl OllamaClient {
    pub fn new(config: &OllamaConfig, request: &RequestConfig) -> Result<Self> {
        let timeout = request.timeout();
        Ok(Self {
            client: http_client(PROVIDER, timeout)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            options: GenerateOptions {
                temperature: request.temperature,
                top_p: request.top_p,
                num_predict: request.max_tokens,
            },
            timeout,
        })
    }

    fn build_body(&self, request: &CompletionRequest) -> GenerateRequest<'_> {
        GenerateRequest {
            model: &self.model,
            prompt: prompt::raw_transcript(
                &request.system_prompt,
                &request.history,
                &request.user_input,
                USER_LABEL,
                ASSISTANT_LABEL,
            ),
            stream: false,
            options: self.options,
        }
    }
}

fn extract_text(response: GenerateResponse) -> Result<String> {
    let text = response.response.trim();
    if text.is_empty() {
        return Err(GatewayError::MalformedResponse {
            provider: PROVIDER,
            detail: "empty response field".to_string(),
        });
    }
    Ok(text.to_string())
}

#[async_trait]
impl CompletionClient for OllamaClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = self.build_body(request);

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| map_send_error(PROVIDER, self.timeout, e))?;

        let response = reject_error_status(PROVIDER, response).await?;

        let envelope: GenerateResponse =
            response.json().await.map_err(|e| GatewayError::MalformedResponse {
                provider: PROVIDER,
                detail: format!("invalid JSON envelope: {e}"),
            })?;

        extract_text(envelope)
    }
}
