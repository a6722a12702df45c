//! # Messages
//!
//! Narrated output produced by the world and the controller.

use serde::{Deserialize, Serialize};

/// How a message should be presented.
///
/// The tone lets a front end style text (the terminal display keeps it plain)
/// and lets tests pick out warnings or fatal narration without matching prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageTone {
    /// Status lines and prompts
    Descriptive,
    /// Description of an empty room
    EmptyRoom,
    /// Light from the cavern entrance
    Entrance,
    /// The player died
    Fatal,
    /// Anything about the fountain itself
    Fountain,
    /// Story text for encounters
    Narrative,
    /// The player won
    Victory,
    /// Nearby hazards, walls, and refused actions
    Warning,
}

/// A single line (or paragraph) of narration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub tone: MessageTone,
}

impl Message {
    pub fn new(text: impl Into<String>, tone: MessageTone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn descriptive(text: impl Into<String>) -> Self {
        Self::new(text, MessageTone::Descriptive)
    }

    pub fn narrative(text: impl Into<String>) -> Self {
        Self::new(text, MessageTone::Narrative)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, MessageTone::Warning)
    }

    pub fn fatal(text: impl Into<String>) -> Self {
        Self::new(text, MessageTone::Fatal)
    }
}

/// Returns true if any message in `messages` contains `needle`.
///
/// Mostly useful in tests and for log filtering.
pub fn mentions(messages: &[Message], needle: &str) -> bool {
    messages.iter().any(|m| m.text.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_tone() {
        assert_eq!(Message::warning("x").tone, MessageTone::Warning);
        assert_eq!(Message::fatal("x").tone, MessageTone::Fatal);
        assert_eq!(Message::narrative("x").tone, MessageTone::Narrative);
        assert_eq!(Message::descriptive("x").tone, MessageTone::Descriptive);
    }

    #[test]
    fn test_mentions() {
        let messages = vec![Message::warning("There is a wall"), Message::narrative("ok")];
        assert!(mentions(&messages, "wall"));
        assert!(!mentions(&messages, "fountain"));
    }
}
