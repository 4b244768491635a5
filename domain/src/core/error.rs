//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Every variant is a configuration error: it is raised while a meeting is
/// being assembled, before any transcript exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Agenda cannot be empty")]
    EmptyAgenda,

    #[error("A team meeting requires a facilitator")]
    MissingFacilitator,

    #[error("A team meeting requires at least one participant")]
    MissingParticipants,

    #[error("An individual meeting requires a participant")]
    MissingParticipant,

    #[error("A team meeting must not also name an individual participant")]
    UnexpectedIndividualParticipant,

    #[error("An individual meeting must not name a facilitator or participant roster")]
    UnexpectedRoster,

    #[error("Facilitator '{0}' must not appear among the participants")]
    FacilitatorInRoster(String),

    #[error("A team meeting needs at least one round")]
    InvalidRounds,

    #[error("Invalid meeting type: {0} (expected 'team' or 'individual')")]
    UnknownMeetingType(String),

    #[error("Unknown persona preset: {0}")]
    UnknownPersona(String),

    #[error("Invalid persona: {0}")]
    InvalidPersona(String),

    #[error("Invalid temperature: {0} (expected a number, 'consistent' or 'creative')")]
    InvalidTemperature(String),
}
