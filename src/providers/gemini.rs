//! Google Gemini generateContent client. Credential travels as a query
//! parameter; the conversation is flattened into a single text part.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{GeminiConfig, RequestConfig};
use crate::error::{GatewayError, Result};
use crate::models::CompletionRequest;
use crate::prompt;

use super::{CompletionClient, http_client, map_send_error, reject_error_status};

const PROVIDER: &str = "gemini";

const USER_LABEL: &str = "User";
const ASSISTANT_LABEL: &str = "AI";

pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    generation_config: GenerationConfig,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig, request: &RequestConfig) -> Result<Self> {
        let timeout = request.timeout();
        Ok(Self {
            client: http_client(PROVIDER, timeout)?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
                top_p: request.top_p,
            },
            timeout,
        })
    }

    fn credential(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(GatewayError::MissingCredential { provider: PROVIDER })
    }

    fn build_body(&self, request: &CompletionRequest) -> GenerateContentRequest {
        let full_prompt = prompt::raw_transcript(
            &request.system_prompt,
            &request.history,
            &request.user_input,
            USER_LABEL,
            ASSISTANT_LABEL,
        );
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: full_prompt }],
            }],
            generation_config: self.generation_config,
        }
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|content| content.parts.into_iter().next())
        .map(|part| part.text.trim().to_string())
        .filter(|t| !t.is_empty());
    text.ok_or(GatewayError::MalformedResponse {
        provider: PROVIDER,
        detail: "no candidate text part".to_string(),
    })
}

#[async_trait]
impl CompletionClient for GeminiClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let api_key = self.credential()?;
        let body = self.build_body(request);

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );
        let response = self
            .client
            .post(url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| map_send_error(PROVIDER, self.timeout, e))?;

        let response = reject_error_status(PROVIDER, response).await?;

        let envelope: GenerateContentResponse =
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

    fn client(api_key: Option<&str>) -> GeminiClient {
        let config = GeminiConfig {
            api_key: api_key.map(str::to_string),
            base_url: "https://generativelanguage.googleapis.com/v1".to_string(),
            model: "gemini-2.0-flash".to_string(),
        };
        let request = RequestConfig {
            timeout_seconds: 5,
            max_tokens: 150,
            temperature: 0.7,
            top_p: 0.9,
        };
        GeminiClient::new(&config, &request).expect("client should build")
    }

    #[test]
    fn test_body_flattens_conversation() {
        let client = client(Some("key"));
        let request = CompletionRequest::new(
            "Be Alex.",
            "how are you?",
            &[ConversationTurn::user("hi"), ConversationTurn::assistant("Hello!")],
        );

        let body = client.build_body(&request);
        let json = serde_json::to_value(&body).expect("body should serialize");

        let text = json["contents"][0]["parts"][0]["text"]
            .as_str()
            .expect("prompt text present");
        assert!(text.contains("User: hi"));
        assert!(text.contains("AI: Hello!"));
        assert!(text.ends_with("AI:"));
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 150);
        let top_p = json["generationConfig"]["topP"]
            .as_f64()
            .expect("topP should be numeric");
        assert!((top_p - 0.9).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_missing_credential_short_circuits() {
        let result = client(None)
            .complete(&CompletionRequest::new("sys", "hi", &[]))
            .await;
        assert!(matches!(
            result,
            Err(GatewayError::MissingCredential { provider: "gemini" })
        ));
    }

    #[test]
    fn test_extract_text_happy_path() {
        let envelope: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": " Hi Sam! "}]}}]}"#,
        )
        .expect("valid envelope");
        assert_eq!(extract_text(envelope).expect("text present"), "Hi Sam!");
    }

    #[test]
    fn test_no_candidates_is_malformed() {
        let envelope: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": []}"#).expect("valid envelope");
        assert!(matches!(
            extract_text(envelope),
            Err(GatewayError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_candidate_without_content_is_malformed() {
        let envelope: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#)
                .expect("valid envelope");
        assert!(matches!(
            extract_text(envelope),
            Err(GatewayError::MalformedResponse { .. })
        ));
    }
}
