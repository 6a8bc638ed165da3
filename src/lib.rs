pub mod analysis;
pub mod config;
pub mod emotions;
pub mod error;
pub mod fallback;
pub mod models;
pub mod persona;
pub mod prompt;
pub mod providers;
pub mod router;

use crate::analysis::{analyze_greeting, encouragement, score_greeting};
use crate::config::Config;
use crate::emotions::judge_emotion;
use crate::error::Result;
use crate::models::{ConversationTurn, EmotionJudgement, GreetingReply};
use crate::persona::{Character, GREETING_SYSTEM_PROMPT};
use crate::router::ProviderRouter;

/// The completion gateway: exercise entry points over one configured
/// backend. Stateless across calls; safe to share behind an `Arc`.
pub struct Gateway {
    router: ProviderRouter,
}

impl Gateway {
    pub fn new(cfg: &Config) -> Result<Self> {
        Ok(Self {
            router: ProviderRouter::from_config(cfg)?,
        })
    }

    /// For embedders and tests that bring their own client.
    pub fn with_router(router: ProviderRouter) -> Self {
        Self { router }
    }

    /// Greeting practice: AI reply plus deterministic feedback on the
    /// child's own utterance. The two halves are independent - feedback and
    /// score are computed locally even when the reply came from a fallback.
    pub async fn greeting_reply(
        &self,
        user_input: &str,
        history: &[ConversationTurn],
    ) -> GreetingReply {
        let ai_response = self
            .router
            .get_reply(GREETING_SYSTEM_PROMPT, user_input, history)
            .await;

        let feedback = analyze_greeting(user_input);
        let score = score_greeting(&feedback);

        GreetingReply {
            ai_response,
            encouragement: encouragement(score).to_string(),
            feedback,
            score,
        }
    }

    /// Scenario practice: same completion pipeline, different persona, no
    /// scoring.
    pub async fn scenario_reply(
        &self,
        character: Character,
        user_input: &str,
        history: &[ConversationTurn],
    ) -> String {
        self.router
            .get_reply(character.system_prompt(), user_input, history)
            .await
    }

    /// Emotion recognition: pure table-driven judgement, no backend call.
    pub fn emotion_feedback(
        &self,
        selected: &str,
        is_correct: bool,
        correct: &str,
    ) -> EmotionJudgement {
        judge_emotion(selected, is_correct, correct)
    }
}
