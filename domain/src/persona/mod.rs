//! Persona domain
//!
//! A [`Persona`] is the role profile a completion model is asked to play.
//! Its [`instruction_text`](Persona::instruction_text) becomes the system
//! instructions of every completion made on its behalf.
//!
//! [`presets`] holds the research team personas shipped with the lab.

pub mod presets;

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A named role profile (Value Object)
///
/// Identity is the `title`: two personas with the same title are the same
/// persona regardless of their other fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    title: String,
    expertise: String,
    goal: String,
    role: String,
}

impl Persona {
    pub fn new(
        title: impl Into<String>,
        expertise: impl Into<String>,
        goal: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            expertise: expertise.into(),
            goal: goal.into(),
            role: role.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn expertise(&self) -> &str {
        &self.expertise
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    /// Second-person system instructions priming the model with this persona
    pub fn instruction_text(&self) -> String {
        format!(
            "You are a {}. Your expertise is in {}. Your goal is to {}. Your role is to {}.",
            self.title, self.expertise, self.goal, self.role
        )
    }
}

impl PartialEq for Persona {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
    }
}

impl Eq for Persona {}

impl Hash for Persona {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}
