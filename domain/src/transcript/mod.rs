//! Transcript domain
//!
//! The [`Transcript`] is the append-only conversation log of one meeting. It
//! is fed back, in order, into every completion request; [`history`] turns it
//! into the two-role sequence the completion backend consumes.

pub mod history;

use crate::persona::Persona;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Label used for turns written by the orchestrator
pub const ORCHESTRATOR_LABEL: &str = "Orchestrator";

/// Returned by [`Transcript::extract_summary`] when nothing was said
pub const NO_SUMMARY: &str = "No summary available.";

/// Who produced a turn
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Speaker {
    /// Directives injected by the orchestrator
    Orchestrator,
    /// A persona, identified by title
    Persona(String),
}

impl Speaker {
    pub fn persona(persona: &Persona) -> Self {
        Speaker::Persona(persona.title().to_string())
    }

    pub fn label(&self) -> &str {
        match self {
            Speaker::Orchestrator => ORCHESTRATOR_LABEL,
            Speaker::Persona(title) => title,
        }
    }

    pub fn is(&self, persona: &Persona) -> bool {
        matches!(self, Speaker::Persona(title) if title == persona.title())
    }
}

impl From<&str> for Speaker {
    fn from(label: &str) -> Self {
        if label == ORCHESTRATOR_LABEL {
            Speaker::Orchestrator
        } else {
            Speaker::Persona(label.to_string())
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for Speaker {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Speaker {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(Speaker::from(label.as_str()))
    }
}

/// One attributed entry of a transcript (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    speaker: Speaker,
    text: String,
}

impl Turn {
    /// Create a turn; surrounding whitespace is trimmed
    pub fn new(speaker: Speaker, text: impl AsRef<str>) -> Self {
        Self {
            speaker,
            text: text.as_ref().trim().to_string(),
        }
    }

    pub fn speaker(&self) -> &Speaker {
        &self.speaker
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered, append-only log of turns (Entity)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a directive written by the orchestrator
    pub fn push_directive(&mut self, text: impl AsRef<str>) -> &Turn {
        self.push(Turn::new(Speaker::Orchestrator, text))
    }

    /// Append a reply spoken by a persona
    pub fn push_reply(&mut self, persona: &Persona, text: impl AsRef<str>) -> &Turn {
        self.push(Turn::new(Speaker::persona(persona), text))
    }

    fn push(&mut self, turn: Turn) -> &Turn {
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Text of the final turn, or [`NO_SUMMARY`] for an empty transcript
    pub fn extract_summary(&self) -> &str {
        self.last().map(Turn::text).unwrap_or(NO_SUMMARY)
    }

    /// Human-readable rendering: one `## speaker` heading per turn
    pub fn to_markdown(&self) -> String {
        self.turns
            .iter()
            .map(|turn| format!("## {}\n\n{}\n\n", turn.speaker, turn.text))
            .collect()
    }
}

impl From<Vec<Turn>> for Transcript {
    fn from(turns: Vec<Turn>) -> Self {
        Self { turns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviewer() -> Persona {
        Persona::new("Reviewer", "peer review", "check claims", "flag errors")
    }

    #[test]
    fn test_turn_text_is_trimmed() {
        let turn = Turn::new(Speaker::Orchestrator, "  \n hello world \n");
        assert_eq!(turn.text(), "hello world");
    }

    #[test]
    fn test_extract_summary_empty() {
        assert_eq!(Transcript::new().extract_summary(), NO_SUMMARY);
    }

    #[test]
    fn test_extract_summary_last_turn() {
        let mut transcript = Transcript::new();
        transcript.push_directive("start");
        transcript.push_reply(&Persona::new("X", "a", "b", "c"), "final");
        assert_eq!(transcript.extract_summary(), "final");
    }

    #[test]
    fn test_append_order_preserved() {
        let mut transcript = Transcript::new();
        transcript.push_directive("one");
        transcript.push_reply(&reviewer(), "two");
        transcript.push_directive("three");
        let texts: Vec<&str> = transcript.turns().iter().map(Turn::text).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
        assert!(transcript.turns()[1].speaker().is(&reviewer()));
    }

    #[test]
    fn test_markdown_rendering() {
        let mut transcript = Transcript::new();
        transcript.push_directive("Please respond.");
        transcript.push_reply(&reviewer(), "Done.");
        assert_eq!(
            transcript.to_markdown(),
            "## Orchestrator\n\nPlease respond.\n\n## Reviewer\n\nDone.\n\n"
        );
    }

    #[test]
    fn test_json_shape() {
        let mut transcript = Transcript::new();
        transcript.push_directive("Please respond.");
        transcript.push_reply(&reviewer(), "Done.");
        let value = serde_json::to_value(&transcript).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"speaker": "Orchestrator", "text": "Please respond."},
                {"speaker": "Reviewer", "text": "Done."}
            ])
        );

        let parsed: Transcript = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, transcript);
    }
}
