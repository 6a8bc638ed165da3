//! System prompts for the practice exercises: the greeting coach persona and
//! the selectable scenario characters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Persona for greeting practice. Kept deliberately prescriptive: short
/// sentences, one question at a time, always encouraging.
pub const GREETING_SYSTEM_PROMPT: &str = "\
You are Alex, a friendly AI helping children with Down syndrome practice social skills.
You're currently teaching greetings and introductions.

Guidelines:
- Use simple, clear language (5-7 word sentences max)
- Be encouraging and positive
- If child's response is appropriate, praise specifically
- If response needs improvement, gently guide
- Stay in character as a friendly peer
- Ask one question at a time
- Never use complex words or long sentences
- Be patient and supportive";

/// Characters the scenario exercise can put on the other side of the
/// conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Character {
    Friend,
    Teacher,
    Shopkeeper,
}

impl Character {
    pub const fn display_name(&self) -> &'static str {
        match self {
            Character::Friend => "Alex",
            Character::Teacher => "Ms. Johnson",
            Character::Shopkeeper => "Mr. Lee",
        }
    }

    pub const fn system_prompt(&self) -> &'static str {
        match self {
            Character::Friend => {
                "You are Alex, a friendly peer of the same age. Use casual, simple language. \
                 Be enthusiastic and encouraging. Keep responses to 1-2 short sentences."
            }
            Character::Teacher => {
                "You are Ms. Johnson, a kind and patient teacher. Be encouraging and educational. \
                 Use simple clear language. Keep responses to 1-2 short sentences."
            }
            Character::Shopkeeper => {
                "You are Mr. Lee, a helpful and friendly shopkeeper. Be polite and helpful. \
                 Keep responses to 1-2 short sentences."
            }
        }
    }

    /// Parse a character name from the exercise UI, falling back to the
    /// friend persona for anything unrecognized.
    pub fn from_string_safe(name: &str) -> Self {
        name.parse().unwrap_or(Character::Friend)
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Character::Friend => "friend",
            Character::Teacher => "teacher",
            Character::Shopkeeper => "shopkeeper",
        };
        f.write_str(s)
    }
}

impl FromStr for Character {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "friend" => Ok(Character::Friend),
            "teacher" => Ok(Character::Teacher),
            "shopkeeper" => Ok(Character::Shopkeeper),
            _ => Err(format!("unknown character: {s}")),
        }
    }
}
