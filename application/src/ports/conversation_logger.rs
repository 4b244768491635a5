//! Meeting event log port
//!
//! Every directive and reply can be mirrored to a machine-readable log as the
//! meeting runs. This sits beside `tracing`, which stays the channel for
//! diagnostics.

use serde_json::Value;

/// One entry of the meeting event log
#[derive(Debug, Clone)]
pub struct ConversationEvent {
    /// "meeting_started", "directive", "reply" or "meeting_completed"
    pub event_type: &'static str,
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Sink for meeting events.
///
/// Logging never fails the meeting; an implementation that cannot write
/// drops the event.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Discards every event
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
