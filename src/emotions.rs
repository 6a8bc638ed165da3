//! Table-driven judgement for the emotion-recognition exercise.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::EmotionJudgement;

const CORRECT_SCORE: u8 = 10;
// Flat consolation score for any wrong pick, however close the guess.
const INCORRECT_SCORE: u8 = 5;

const GENERIC_CUES: &str = "Look at the eyes, mouth, and eyebrows for clues!";

/// The closed set of emotions the exercise can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Scared,
    Surprised,
    Confused,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Scared,
        Emotion::Surprised,
        Emotion::Confused,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Scared => "scared",
            Emotion::Surprised => "surprised",
            Emotion::Confused => "confused",
        }
    }

    /// Visual cues a learner can look for on a face showing this emotion.
    pub const fn cues(&self) -> &'static str {
        match self {
            Emotion::Happy => {
                "Their eyes are smiling\nThe corners of the mouth turn up\nThe whole face looks bright"
            }
            Emotion::Sad => {
                "Their eyes look down\nThe corners of the mouth turn down\nThey might be crying"
            }
            Emotion::Angry => {
                "The eyebrows are pushed together\nTheir eyes look intense\nThe mouth might be tight"
            }
            Emotion::Scared => {
                "Their eyes are wide open\nThe eyebrows are raised\nThe mouth might be open"
            }
            Emotion::Surprised => {
                "Their eyes are very wide\nThe eyebrows are raised high\nThe mouth is open"
            }
            Emotion::Confused => {
                "The eyebrows are tilted\nTheir eyes are searching\nThe head might be tilted"
            }
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "happy" => Ok(Emotion::Happy),
            "sad" => Ok(Emotion::Sad),
            "angry" => Ok(Emotion::Angry),
            "scared" => Ok(Emotion::Scared),
            "surprised" => Ok(Emotion::Surprised),
            "confused" => Ok(Emotion::Confused),
            _ => Err(format!("unknown emotion: {s}")),
        }
    }
}

/// Cue description for a label from the exercise UI. Unrecognized labels get
/// a generic look-at-the-face instruction instead of an error.
pub fn visual_cues(label: &str) -> &'static str {
    label
        .parse::<Emotion>()
        .map(|e| e.cues())
        .unwrap_or(GENERIC_CUES)
}

/// Judge one multiple-choice answer.
///
/// A correct pick affirms the selected emotion and explains its cues. A wrong
/// pick gets a neutral redirect and the cues of the *correct* emotion, so the
/// learner knows what to look for next time.
pub fn judge_emotion(selected: &str, is_correct: bool, correct: &str) -> EmotionJudgement {
    if is_correct {
        EmotionJudgement {
            feedback: format!("Excellent! That's right - the person is {selected}!"),
            explanation: visual_cues(selected).to_string(),
            score: CORRECT_SCORE,
        }
    } else {
        EmotionJudgement {
            feedback: "Not quite. Let's look at the clues together.".to_string(),
            explanation: visual_cues(correct).to_string(),
            score: INCORRECT_SCORE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_answer_scores_ten() {
        let judgement = judge_emotion("happy", true, "happy");

        assert_eq!(judgement.score, 10);
        assert!(judgement.feedback.contains("happy"));
        assert_eq!(judgement.explanation, Emotion::Happy.cues());
    }

    #[test]
    fn test_incorrect_answer_explains_correct_emotion() {
        let judgement = judge_emotion("sad", false, "happy");

        assert_eq!(judgement.score, 5);
        // the explanation teaches the correct label's cues, not the guess
        assert_eq!(judgement.explanation, Emotion::Happy.cues());
        assert!(!judgement.feedback.contains("sad"));
    }

    #[test]
    fn test_labels_parse_case_insensitively() {
        assert_eq!("Happy".parse::<Emotion>(), Ok(Emotion::Happy));
        assert_eq!(" SURPRISED ".parse::<Emotion>(), Ok(Emotion::Surprised));
        assert!("bored".parse::<Emotion>().is_err());
    }

    #[test]
    fn test_unknown_label_gets_generic_cues() {
        assert_eq!(visual_cues("bored"), GENERIC_CUES);
        let judgement = judge_emotion("bored", true, "bored");
        assert_eq!(judgement.explanation, GENERIC_CUES);
        assert_eq!(judgement.score, 10);
    }

    #[test]
    fn test_every_emotion_has_multiline_cues() {
        for emotion in Emotion::ALL {
            assert!(
                emotion.cues().lines().count() >= 2,
                "{emotion} cues should name several things to look at"
            );
        }
    }
}
