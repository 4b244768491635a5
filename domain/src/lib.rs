//! Domain layer for virtual-lab
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Meeting
//!
//! A meeting is a scripted conversation between personas played by a
//! completion model:
//!
//! - **Team meeting**: a facilitator and an ordered roster of participants
//!   discuss the agenda for a fixed number of rounds, then the facilitator
//!   writes a structured summary
//! - **Individual meeting**: a single persona answers the agenda once
//!
//! ## Transcript
//!
//! Every directive and reply is appended to the meeting's transcript, which is
//! replayed to the model on each turn.

pub mod config;
pub mod core;
pub mod directive;
pub mod meeting;
pub mod persona;
pub mod tool;
pub mod transcript;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::{
    error::DomainError,
    model::{Model, Provider},
    sampling::{CONSISTENT_TEMPERATURE, CREATIVE_TEMPERATURE, SamplingParams, parse_temperature},
    usage::{ModelPricing, PricingTable, TokenUsage},
};
pub use directive::DirectiveTemplate;
pub use meeting::{
    Agenda, MeetingConfig, MeetingKind, MeetingPhase, MeetingPlan, MeetingRequest, MeetingStep,
    MeetingType, PriorMaterial,
};
pub use persona::Persona;
pub use tool::{LookupRequest, ToolCall, ToolDefinition};
pub use transcript::{
    NO_SUMMARY, Speaker, Transcript, Turn,
    history::{ConversationRole, HistoryEntry, collapse_roles},
};
