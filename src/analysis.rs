//! Deterministic analysis of the learner's own utterance for the greeting
//! exercise. Pure functions, no I/O; identical input yields identical
//! feedback items in identical order.

use crate::models::{FeedbackItem, FeedbackTag};

const GREETING_WORDS: [&str; 3] = ["hi", "hello", "hey"];
const INTRODUCTION_PHRASES: [&str; 3] = ["my name", "i'm", "i am"];

const MIN_WORDS: usize = 3;
const MAX_WORDS: usize = 15;

/// Inspect a greeting attempt and produce ordered, tagged feedback.
///
/// Checks are case-insensitive substring matches against the raw utterance.
/// If no check produced a positive item, a hint is appended; the hint never
/// counts toward the score.
pub fn analyze_greeting(text: &str) -> Vec<FeedbackItem> {
    let mut feedback = Vec::new();
    let lower = text.to_lowercase();

    if GREETING_WORDS.iter().any(|w| lower.contains(w)) {
        feedback.push(FeedbackItem::positive("Great greeting!"));
    }

    if INTRODUCTION_PHRASES.iter().any(|p| lower.contains(p)) {
        feedback.push(FeedbackItem::positive("You introduced yourself!"));
    }

    if lower.contains("please") || lower.contains("thank") {
        feedback.push(FeedbackItem::positive("So polite!"));
    }

    if lower.contains('?') || lower.contains("how are") || lower.contains("what") {
        feedback.push(FeedbackItem::positive("Nice question!"));
    }

    let word_count = text.split_whitespace().count();
    if word_count < MIN_WORDS {
        feedback.push(FeedbackItem::warning("Try saying a bit more next time"));
    } else if word_count > MAX_WORDS {
        feedback.push(FeedbackItem::warning("Try to keep it shorter and simpler"));
    } else {
        feedback.push(FeedbackItem::positive("Good response length!"));
    }

    if !feedback.iter().any(|f| f.tag == FeedbackTag::Positive) {
        feedback.push(FeedbackItem::hint("Try starting with 'Hi' or 'Hello'"));
    }

    feedback
}

/// Fold feedback into a score: 2.5 points per positive, minus 1 per warning,
/// clamped to [0, 10] and rounded. Hints are ignored.
pub fn score_greeting(feedback: &[FeedbackItem]) -> u8 {
    let positives = feedback
        .iter()
        .filter(|f| f.tag == FeedbackTag::Positive)
        .count();
    let warnings = feedback
        .iter()
        .filter(|f| f.tag == FeedbackTag::Warning)
        .count();

    let score = positives as f64 * 2.5 - warnings as f64;
    score.clamp(0.0, 10.0).round() as u8
}

/// Encouragement line for a final score.
pub fn encouragement(score: u8) -> &'static str {
    if score >= 9 {
        "Outstanding! You're a natural!"
    } else if score >= 7 {
        "Excellent work! Keep it up!"
    } else if score >= 5 {
        "Good job! You're improving!"
    } else {
        "Nice try! Let's practice more!"
    }
}
