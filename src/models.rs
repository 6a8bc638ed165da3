use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Speaker attribution for one conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in a practice conversation. History is an ordered slice of
/// these; order is chronological and is preserved all the way into the
/// rendered prompt. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(message: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Everything a backend needs for one completion. Value type, one per call;
/// clients only read it.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub history: Vec<ConversationTurn>,
    pub user_input: String,
}

impl CompletionRequest {
    pub fn new(system_prompt: &str, user_input: &str, history: &[ConversationTurn]) -> Self {
        Self {
            system_prompt: system_prompt.to_string(),
            history: history.to_vec(),
            user_input: user_input.to_string(),
        }
    }
}

// Chat-style wire message, shared by the chat-protocol providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Kind of one feedback item produced by the greeting analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackTag {
    Positive,
    Warning,
    Hint,
}

/// One tagged feedback line shown to the learner. The persistence
/// collaborator stores these serialized, hence the serde derives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub tag: FeedbackTag,
    pub text: String,
}

impl FeedbackItem {
    pub fn positive(text: impl Into<String>) -> Self {
        Self {
            tag: FeedbackTag::Positive,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            tag: FeedbackTag::Warning,
            text: text.into(),
        }
    }

    pub fn hint(text: impl Into<String>) -> Self {
        Self {
            tag: FeedbackTag::Hint,
            text: text.into(),
        }
    }
}

/// Full result of one greeting-practice exchange.
#[derive(Debug, Clone, Serialize)]
pub struct GreetingReply {
    pub ai_response: String,
    pub feedback: Vec<FeedbackItem>,
    pub score: u8,
    pub encouragement: String,
}

/// Result of one emotion-recognition judgement. `score` is 10 for a correct
/// pick, 5 otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmotionJudgement {
    pub feedback: String,
    pub explanation: String,
    pub score: u8,
}
