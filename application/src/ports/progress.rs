//! Progress notification port
//!
//! Defines the interface for reporting progress while a meeting runs.

use lab_domain::{MeetingPhase, MeetingType, Persona};

/// Callback for progress updates during a meeting
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain log lines, etc.)
pub trait MeetingProgress: Send + Sync {
    /// Called once before the first turn with the number of replies to expect
    fn on_meeting_start(&self, meeting_type: MeetingType, total_replies: usize);

    /// Called when a persona is asked for a reply
    fn on_turn_start(&self, phase: &MeetingPhase, speaker: &Persona);

    /// Called when a persona's reply has been appended
    fn on_turn_complete(&self, phase: &MeetingPhase, speaker: &Persona);

    /// Called when generating a reply failed; the meeting stops afterwards
    fn on_turn_failed(&self, _phase: &MeetingPhase, _speaker: &Persona, _error: &str) {}

    /// Called after the transcript has been persisted
    fn on_meeting_complete(&self, _turns: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl MeetingProgress for NoProgress {
    fn on_meeting_start(&self, _meeting_type: MeetingType, _total_replies: usize) {}
    fn on_turn_start(&self, _phase: &MeetingPhase, _speaker: &Persona) {}
    fn on_turn_complete(&self, _phase: &MeetingPhase, _speaker: &Persona) {}
}
