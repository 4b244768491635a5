//! Application layer for virtual-lab
//!
//! This crate contains the meeting use case and the port definitions its
//! adapters implement. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    completion_gateway::{Completion, CompletionGateway, CompletionRequest, GatewayError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{MeetingProgress, NoProgress},
    reference_lookup::{LookupError, NoLookup, ReferenceLookup},
    transcript_store::{SaveTarget, SavedTranscript, StoreError, TranscriptStore},
};
pub use use_cases::run_meeting::{
    RunMeetingError, RunMeetingInput, RunMeetingOutput, RunMeetingUseCase,
};
