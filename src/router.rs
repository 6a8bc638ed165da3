//! Routes one conversational turn to the active backend and guarantees text
//! comes back, whatever the backend does.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::fallback::FallbackResponder;
use crate::models::{CompletionRequest, ConversationTurn};
use crate::providers::{self, CompletionClient};

pub struct ProviderRouter {
    client: Arc<dyn CompletionClient>,
    fallback: FallbackResponder,
}

impl ProviderRouter {
    pub fn new(client: Arc<dyn CompletionClient>, fallback: FallbackResponder) -> Self {
        Self { client, fallback }
    }

    /// Select the client for the configured provider.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(providers::client_for(config)?, FallbackResponder::new()))
    }

    /// One completion attempt; never fails outward.
    ///
    /// Empty `user_input` is the caller's responsibility to reject. Any
    /// backend failure is logged and replaced with a fallback phrase; the
    /// learner never sees a raw error. No retry - a failed attempt resolves
    /// to the fallback immediately.
    pub async fn get_reply(
        &self,
        system_prompt: &str,
        user_input: &str,
        history: &[ConversationTurn],
    ) -> String {
        let request = CompletionRequest::new(system_prompt, user_input, history);

        match self.client.complete(&request).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                tracing::warn!(
                    provider = self.client.provider_name(),
                    error = %e,
                    "completion failed, serving fallback"
                );
                self.fallback.respond().to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use crate::providers::MockCompletionClient;

    fn failing_client(err: fn() -> GatewayError) -> MockCompletionClient {
        let mut mock = MockCompletionClient::new();
        mock.expect_provider_name().return_const("mock");
        mock.expect_complete().returning(move |_| Err(err()));
        mock
    }

    #[tokio::test]
    async fn test_ok_reply_is_trimmed() {
        let mut mock = MockCompletionClient::new();
        mock.expect_provider_name().return_const("mock");
        mock.expect_complete()
            .returning(|_| Ok("  Hi Sam! How are you?  \n".to_string()));
        let router = ProviderRouter::new(Arc::new(mock), FallbackResponder::new());

        let reply = router.get_reply("sys", "hi", &[]).await;
        assert_eq!(reply, "Hi Sam! How are you?");
    }

    #[tokio::test]
    async fn test_request_carries_history_in_order() {
        let mut mock = MockCompletionClient::new();
        mock.expect_provider_name().return_const("mock");
        mock.expect_complete()
            .withf(|req: &CompletionRequest| {
                req.history.len() == 2
                    && req.history[0].message == "first"
                    && req.history[1].message == "second"
                    && req.user_input == "third"
            })
            .returning(|_| Ok("ok".to_string()));
        let router = ProviderRouter::new(Arc::new(mock), FallbackResponder::new());

        let history = vec![
            ConversationTurn::assistant("first"),
            ConversationTurn::user("second"),
        ];
        let reply = router.get_reply("sys", "third", &history).await;
        assert_eq!(reply, "ok");
    }

    #[tokio::test]
    async fn test_every_failure_kind_falls_back() {
        let errors: [fn() -> GatewayError; 5] = [
            || GatewayError::MissingCredential { provider: "mock" },
            || GatewayError::Timeout {
                provider: "mock",
                timeout_ms: 30_000,
            },
            || GatewayError::NetworkUnreachable {
                provider: "mock",
                message: "connection refused".to_string(),
            },
            || GatewayError::UpstreamRejected {
                provider: "mock",
                status: 429,
                body: "rate limited".to_string(),
            },
            || GatewayError::MalformedResponse {
                provider: "mock",
                detail: "empty choices".to_string(),
            },
        ];

        for err in errors {
            let router = ProviderRouter::new(Arc::new(failing_client(err)), FallbackResponder::new());
            let reply = router.get_reply("sys", "hi", &[]).await;
            assert!(!reply.is_empty());
            assert!(
                FallbackResponder::phrases().contains(&reply.as_str()),
                "fallback should come from the fixed set, got {reply:?}"
            );
        }
    }
}
