//! Turn sequence of a meeting
//!
//! Directives never depend on what the models answered, so the whole turn
//! order can be laid out before the first completion is requested. Each
//! [`MeetingStep`] is "append this directive, then let this persona reply".

use super::config::{MeetingConfig, MeetingKind};
use crate::directive::DirectiveTemplate;
use crate::persona::Persona;
use serde::{Deserialize, Serialize};

/// Position of a step in the meeting state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum MeetingPhase {
    /// Facilitator answers the opening directive
    Opening,
    /// One participant's turn within a round
    ParticipantTurn { round: u32, rounds: u32 },
    /// Facilitator wraps up a non-final round
    Synthesis { round: u32, rounds: u32 },
    /// Facilitator writes the structured summary
    FinalSummary,
    /// The only turn of an individual meeting
    IndividualResponse,
}

impl MeetingPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingPhase::Opening => "opening",
            MeetingPhase::ParticipantTurn { .. } => "participant_turn",
            MeetingPhase::Synthesis { .. } => "synthesis",
            MeetingPhase::FinalSummary => "final_summary",
            MeetingPhase::IndividualResponse => "individual_response",
        }
    }

    /// Round this step belongs to, if any
    pub fn round(&self) -> Option<u32> {
        match self {
            MeetingPhase::ParticipantTurn { round, .. } | MeetingPhase::Synthesis { round, .. } => {
                Some(*round)
            }
            _ => None,
        }
    }

    /// Whether this step produces the meeting's result
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            MeetingPhase::FinalSummary | MeetingPhase::IndividualResponse
        )
    }
}

impl std::fmt::Display for MeetingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeetingPhase::Opening => write!(f, "Opening"),
            MeetingPhase::ParticipantTurn { round, rounds } => {
                write!(f, "Round {}/{}", round, rounds)
            }
            MeetingPhase::Synthesis { round, rounds } => {
                write!(f, "Synthesis {}/{}", round, rounds)
            }
            MeetingPhase::FinalSummary => write!(f, "Final Summary"),
            MeetingPhase::IndividualResponse => write!(f, "Response"),
        }
    }
}

/// One directive/reply pair
#[derive(Debug, Clone)]
pub struct MeetingStep<'a> {
    pub phase: MeetingPhase,
    pub directive: String,
    pub speaker: &'a Persona,
}

/// Ordered steps of a meeting
#[derive(Debug, Clone)]
pub struct MeetingPlan<'a> {
    steps: Vec<MeetingStep<'a>>,
}

impl<'a> MeetingPlan<'a> {
    pub fn new(config: &'a MeetingConfig) -> Self {
        let agenda = config.agenda();
        let prior = config.prior();

        let steps = match config.kind() {
            MeetingKind::Individual { participant } => vec![MeetingStep {
                phase: MeetingPhase::IndividualResponse,
                directive: DirectiveTemplate::individual_start(participant, agenda, prior),
                speaker: participant,
            }],
            MeetingKind::Team {
                facilitator,
                participants,
                rounds,
            } => {
                let rounds = *rounds;
                let mut steps = Vec::with_capacity(1 + (participants.len() + 1) * rounds as usize);
                steps.push(MeetingStep {
                    phase: MeetingPhase::Opening,
                    directive: DirectiveTemplate::team_start(
                        facilitator,
                        participants,
                        agenda,
                        prior,
                        rounds,
                    ),
                    speaker: facilitator,
                });

                for round in 1..=rounds {
                    for participant in participants {
                        steps.push(MeetingStep {
                            phase: MeetingPhase::ParticipantTurn { round, rounds },
                            directive: DirectiveTemplate::participant_turn(
                                participant,
                                round,
                                rounds,
                            ),
                            speaker: participant,
                        });
                    }

                    let closing = if round < rounds {
                        MeetingStep {
                            phase: MeetingPhase::Synthesis { round, rounds },
                            directive: DirectiveTemplate::facilitator_synthesis(
                                facilitator,
                                round,
                                rounds,
                            ),
                            speaker: facilitator,
                        }
                    } else {
                        MeetingStep {
                            phase: MeetingPhase::FinalSummary,
                            directive: DirectiveTemplate::facilitator_final(facilitator, agenda),
                            speaker: facilitator,
                        }
                    };
                    steps.push(closing);
                }
                steps
            }
        };

        Self { steps }
    }

    pub fn steps(&self) -> &[MeetingStep<'a>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Turns the transcript will hold once every step has run
    pub fn expected_turns(&self) -> usize {
        self.steps.len() * 2
    }
}

impl<'a> IntoIterator for MeetingPlan<'a> {
    type Item = MeetingStep<'a>;
    type IntoIter = std::vec::IntoIter<MeetingStep<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}
