//! Validated meeting configuration

use crate::core::error::DomainError;
use crate::core::sampling::SamplingParams;
use crate::persona::Persona;
use crate::transcript::ORCHESTRATOR_LABEL;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Rounds used when a team meeting does not specify any
pub const DEFAULT_ROUNDS: u32 = 2;

/// What the meeting is about (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agenda {
    text: String,
    questions: Vec<String>,
    rules: Vec<String>,
}

impl Agenda {
    /// Create an agenda; blank text is rejected
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::EmptyAgenda);
        }
        Ok(Self {
            text,
            questions: Vec::new(),
            rules: Vec::new(),
        })
    }

    pub fn with_questions(mut self, questions: Vec<String>) -> Self {
        self.questions = questions;
        self
    }

    pub fn with_rules(mut self, rules: Vec<String>) -> Self {
        self.rules = rules;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn has_questions(&self) -> bool {
        !self.questions.is_empty()
    }
}

/// Material carried over from earlier meetings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorMaterial {
    pub summaries: Vec<String>,
    pub contexts: Vec<String>,
}

/// Meeting variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeetingType {
    Team,
    Individual,
}

impl MeetingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingType::Team => "team",
            MeetingType::Individual => "individual",
        }
    }
}

impl std::fmt::Display for MeetingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MeetingType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "team" => Ok(MeetingType::Team),
            "individual" => Ok(MeetingType::Individual),
            _ => Err(DomainError::UnknownMeetingType(s.to_string())),
        }
    }
}

/// Who takes part in the meeting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingKind {
    /// Facilitator-led discussion over a fixed number of rounds
    Team {
        facilitator: Persona,
        participants: Vec<Persona>,
        rounds: u32,
    },
    /// Single persona answering the agenda once
    Individual { participant: Persona },
}

impl MeetingKind {
    pub fn meeting_type(&self) -> MeetingType {
        match self {
            MeetingKind::Team { .. } => MeetingType::Team,
            MeetingKind::Individual { .. } => MeetingType::Individual,
        }
    }
}

/// A fully validated meeting (Entity)
///
/// Only constructible through [`MeetingConfig::team`] and
/// [`MeetingConfig::individual`], so every instance satisfies the roster
/// invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingConfig {
    kind: MeetingKind,
    agenda: Agenda,
    prior: PriorMaterial,
    sampling: SamplingParams,
}

/// Reject titles that could not be told apart from directives once persisted
fn check_title(persona: &Persona) -> Result<(), DomainError> {
    let title = persona.title();
    if title.trim().is_empty() {
        return Err(DomainError::InvalidPersona(
            "persona title cannot be empty".to_string(),
        ));
    }
    if title == ORCHESTRATOR_LABEL {
        return Err(DomainError::InvalidPersona(format!(
            "'{}' is reserved for meeting directives",
            ORCHESTRATOR_LABEL
        )));
    }
    Ok(())
}

impl MeetingConfig {
    /// Build a team meeting.
    ///
    /// Fails when the roster is empty, the facilitator also appears in it,
    /// `rounds` is zero, or a persona uses the reserved directive label.
    pub fn team(
        facilitator: Persona,
        participants: Vec<Persona>,
        rounds: u32,
        agenda: Agenda,
    ) -> Result<Self, DomainError> {
        for persona in std::iter::once(&facilitator).chain(&participants) {
            check_title(persona)?;
        }
        if participants.is_empty() {
            return Err(DomainError::MissingParticipants);
        }
        if participants.contains(&facilitator) {
            return Err(DomainError::FacilitatorInRoster(
                facilitator.title().to_string(),
            ));
        }
        if rounds == 0 {
            return Err(DomainError::InvalidRounds);
        }
        Ok(Self::with_kind(
            MeetingKind::Team {
                facilitator,
                participants,
                rounds,
            },
            agenda,
        ))
    }

    /// Build an individual meeting
    pub fn individual(participant: Persona, agenda: Agenda) -> Result<Self, DomainError> {
        check_title(&participant)?;
        Ok(Self::with_kind(
            MeetingKind::Individual { participant },
            agenda,
        ))
    }

    fn with_kind(kind: MeetingKind, agenda: Agenda) -> Self {
        Self {
            kind,
            agenda,
            prior: PriorMaterial::default(),
            sampling: SamplingParams::default(),
        }
    }

    pub fn with_summaries(mut self, summaries: Vec<String>) -> Self {
        self.prior.summaries = summaries;
        self
    }

    pub fn with_contexts(mut self, contexts: Vec<String>) -> Self {
        self.prior.contexts = contexts;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn kind(&self) -> &MeetingKind {
        &self.kind
    }

    pub fn meeting_type(&self) -> MeetingType {
        self.kind.meeting_type()
    }

    pub fn agenda(&self) -> &Agenda {
        &self.agenda
    }

    pub fn prior(&self) -> &PriorMaterial {
        &self.prior
    }

    pub fn sampling(&self) -> &SamplingParams {
        &self.sampling
    }

    /// Every persona that speaks, facilitator first
    pub fn speakers(&self) -> Vec<&Persona> {
        match &self.kind {
            MeetingKind::Team {
                facilitator,
                participants,
                ..
            } => std::iter::once(facilitator).chain(participants).collect(),
            MeetingKind::Individual { participant } => vec![participant],
        }
    }
}
