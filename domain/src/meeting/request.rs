//! Loosely typed meeting request, as read from a file or CLI

use super::config::{Agenda, DEFAULT_ROUNDS, MeetingConfig, MeetingType};
use crate::core::error::DomainError;
use crate::core::sampling::SamplingParams;
use crate::persona::Persona;

/// Unvalidated meeting description.
///
/// Both team and individual fields may be filled in; [`MeetingRequest::validate`]
/// checks that they match the declared `meeting_type` and produces a
/// [`MeetingConfig`].
#[derive(Debug, Clone, Default)]
pub struct MeetingRequest {
    pub meeting_type: String,
    pub facilitator: Option<Persona>,
    pub participants: Vec<Persona>,
    pub participant: Option<Persona>,
    pub agenda: String,
    pub agenda_questions: Vec<String>,
    pub agenda_rules: Vec<String>,
    pub summaries: Vec<String>,
    pub contexts: Vec<String>,
    pub rounds: Option<u32>,
    pub sampling: SamplingParams,
}

impl MeetingRequest {
    pub fn validate(self) -> Result<MeetingConfig, DomainError> {
        let meeting_type: MeetingType = self.meeting_type.parse()?;

        let agenda = Agenda::new(self.agenda)?
            .with_questions(self.agenda_questions)
            .with_rules(self.agenda_rules);

        let config = match meeting_type {
            MeetingType::Team => {
                if self.participant.is_some() {
                    return Err(DomainError::UnexpectedIndividualParticipant);
                }
                let facilitator = self.facilitator.ok_or(DomainError::MissingFacilitator)?;
                MeetingConfig::team(
                    facilitator,
                    self.participants,
                    self.rounds.unwrap_or(DEFAULT_ROUNDS),
                    agenda,
                )?
            }
            MeetingType::Individual => {
                if self.facilitator.is_some() || !self.participants.is_empty() {
                    return Err(DomainError::UnexpectedRoster);
                }
                let participant = self.participant.ok_or(DomainError::MissingParticipant)?;
                MeetingConfig::individual(participant, agenda)?
            }
        };

        Ok(config
            .with_summaries(self.summaries)
            .with_contexts(self.contexts)
            .with_sampling(self.sampling))
    }
}
