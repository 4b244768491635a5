//! Meeting domain
//!
//! - [`config::MeetingConfig`]: validated team or individual meeting
//! - [`request::MeetingRequest`]: unvalidated form read from files
//! - [`plan::MeetingPlan`]: directive/reply steps in execution order

pub mod config;
pub mod plan;
pub mod request;

pub use config::{Agenda, DEFAULT_ROUNDS, MeetingConfig, MeetingKind, MeetingType, PriorMaterial};
pub use plan::{MeetingPhase, MeetingPlan, MeetingStep};
pub use request::MeetingRequest;
