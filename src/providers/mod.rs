//! Completion backends. One client per provider, all behind the
//! [`CompletionClient`] trait; [`client_for`] is the routing table the rest
//! of the crate goes through.

pub mod anthropic;
pub mod gemini;
pub mod ollama;
pub mod openai;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::{Config, ProviderKind};
use crate::error::{GatewayError, Result};
use crate::models::CompletionRequest;

pub use anthropic::AnthropicClient;
pub use gemini::GeminiClient;
pub use ollama::OllamaClient;
pub use openai::OpenAiClient;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Send one completion request and return the generated text. Exactly
    /// one attempt; every failure mode maps into the gateway taxonomy.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// Select the client for the active provider. The match is the entire
/// routing table: a new backend is one variant and one arm here.
pub fn client_for(config: &Config) -> Result<Arc<dyn CompletionClient>> {
    let client = match config.provider {
        ProviderKind::Ollama => {
            Arc::new(OllamaClient::new(&config.ollama, &config.request)?) as Arc<dyn CompletionClient>
        }
        ProviderKind::OpenAi => Arc::new(OpenAiClient::new(&config.openai, &config.request)?),
        ProviderKind::Anthropic => {
            Arc::new(AnthropicClient::new(&config.anthropic, &config.request)?)
        }
        ProviderKind::Gemini => Arc::new(GeminiClient::new(&config.gemini, &config.request)?),
    };
    tracing::info!(provider = client.provider_name(), "completion backend selected");
    Ok(client)
}

/// Build an HTTP client with the bounded request timeout every provider
/// call runs under.
pub(crate) fn http_client(provider: &'static str, timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| GatewayError::Config(format!("failed to build {provider} HTTP client: {e}")))
}

/// Map a reqwest send error into the taxonomy: an elapsed timeout is
/// `Timeout`, anything else transport-level is `NetworkUnreachable`.
pub(crate) fn map_send_error(
    provider: &'static str,
    timeout: Duration,
    err: reqwest::Error,
) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout {
            provider,
            timeout_ms: timeout.as_millis() as u64,
        }
    } else {
        GatewayError::NetworkUnreachable {
            provider,
            message: err.to_string(),
        }
    }
}

/// Reject non-2xx responses, keeping the upstream body for the log line.
pub(crate) async fn reject_error_status(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    Err(GatewayError::UpstreamRejected {
        provider,
        status: status.as_u16(),
        body,
    })
}
