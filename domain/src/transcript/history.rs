//! Two-role conversation history derived from a transcript
//!
//! Completion backends only know two roles. From the point of view of the
//! persona being asked, its own earlier replies are [`ConversationRole::Generator`]
//! and everything else (directives, other personas) is
//! [`ConversationRole::Requester`]. Adjacent entries with the same role are
//! merged so the roles strictly alternate.

use super::Transcript;
use crate::persona::Persona;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationRole {
    /// The model's own prior replies
    Generator,
    /// Everything the model is responding to
    Requester,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: ConversationRole,
    pub text: String,
}

impl HistoryEntry {
    pub fn new(role: ConversationRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

impl Transcript {
    /// History as seen by `persona`, already collapsed
    pub fn history_for(&self, persona: &Persona) -> Vec<HistoryEntry> {
        let entries = self.turns().iter().map(|turn| {
            let role = if turn.speaker().is(persona) {
                ConversationRole::Generator
            } else {
                ConversationRole::Requester
            };
            HistoryEntry::new(role, turn.text())
        });
        collapse_roles(entries)
    }
}

/// Merge adjacent entries sharing a role, joining their text with `\n`.
///
/// Idempotent: collapsing an already collapsed sequence returns it unchanged.
pub fn collapse_roles(entries: impl IntoIterator<Item = HistoryEntry>) -> Vec<HistoryEntry> {
    entries
        .into_iter()
        .fold(Vec::new(), |mut merged: Vec<HistoryEntry>, entry| {
            match merged.last_mut() {
                Some(last) if last.role == entry.role => {
                    last.text.push('\n');
                    last.text.push_str(&entry.text);
                }
                _ => merged.push(entry),
            }
            merged
        })
}
