//! Renders a system instruction, prior turns, and the new utterance into the
//! input shape a backend expects. The builder only reads history: turns are
//! never reordered, dropped, or truncated here.

use crate::models::{ChatMessage, ConversationTurn, Role};

const fn role_str(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

/// Ordered role-tagged messages for chat-style backends: system first, then
/// history in chronological order, then the new input as a user message.
pub fn chat_messages(
    system_prompt: &str,
    history: &[ConversationTurn],
    user_input: &str,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage {
        role: "system".to_string(),
        content: system_prompt.to_string(),
    });
    for turn in history {
        messages.push(ChatMessage {
            role: role_str(turn.role).to_string(),
            content: turn.message.clone(),
        });
    }
    messages.push(ChatMessage {
        role: "user".to_string(),
        content: user_input.to_string(),
    });
    messages
}

/// Single text prompt for raw-completion backends: system text, each history
/// line as `"<label>: <message>"`, the new input, and a trailing speaker cue
/// so the backend knows whose turn is next.
pub fn raw_transcript(
    system_prompt: &str,
    history: &[ConversationTurn],
    user_input: &str,
    user_label: &str,
    assistant_label: &str,
) -> String {
    let mut prompt = String::from(system_prompt);
    prompt.push('\n');
    for turn in history {
        let label = match turn.role {
            Role::User => user_label,
            Role::Assistant => assistant_label,
        };
        prompt.push('\n');
        prompt.push_str(label);
        prompt.push_str(": ");
        prompt.push_str(&turn.message);
    }
    prompt.push('\n');
    prompt.push_str(user_label);
    prompt.push_str(": ");
    prompt.push_str(user_input);
    prompt.push('\n');
    prompt.push_str(assistant_label);
    prompt.push(':');
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> Vec<ConversationTurn> {
        vec![
            ConversationTurn::assistant("Hi! I'm Alex. What's your name?"),
            ConversationTurn::user("I'm Sam"),
        ]
    }

    #[test]
    fn test_chat_messages_order_and_roles() {
        let messages = chat_messages("Be friendly.", &history(), "How are you?");

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "Be friendly.");
        assert_eq!(messages[1].role, "assistant");
        assert_eq!(messages[1].content, "Hi! I'm Alex. What's your name?");
        assert_eq!(messages[2].role, "user");
        assert_eq!(messages[2].content, "I'm Sam");
        assert_eq!(messages[3].role, "user");
        assert_eq!(messages[3].content, "How are you?");
    }

    #[test]
    fn test_chat_messages_empty_history() {
        let messages = chat_messages("sys", &[], "hello");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "hello");
    }

    #[test]
    fn test_raw_transcript_preserves_speaker_sequence() {
        let prompt = raw_transcript("Be friendly.", &history(), "How are you?", "Child", "Alex");

        let alex_line = prompt
            .find("Alex: Hi! I'm Alex.")
            .expect("first turn should be present");
        let sam_line = prompt.find("Child: I'm Sam").expect("second turn should be present");
        let new_line = prompt
            .find("Child: How are you?")
            .expect("new input should be present");
        assert!(alex_line < sam_line);
        assert!(sam_line < new_line);
        assert!(prompt.ends_with("Alex:"));
    }

    #[test]
    fn test_raw_transcript_empty_history() {
        let prompt = raw_transcript("Be friendly.", &[], "hi there", "User", "AI");
        assert!(prompt.starts_with("Be friendly.\n"));
        assert!(prompt.contains("User: hi there"));
        assert!(prompt.ends_with("AI:"));
    }
}
