//! Engine events for the presentation surface
//!
//! The widget (or anything else on the page, like the main contact form)
//! subscribes to these instead of reaching into engine state.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::lead::{Lead, LeadField};
use crate::conversation::TurnEntry;

/// Buffered events per subscriber before the slowest one starts lagging
const EVENT_BUFFER: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    TurnAppended { entry: TurnEntry },
    FieldCaptured { field: LeadField, value: String },
    SubmissionStarted { lead: Lead },
    LeadSubmitted { lead: Lead },
    SubmissionFailed { reason: String },
    ConversationReset,
}

impl EngineEvent {
    /// SSE event name
    pub fn name(&self) -> &'static str {
        match self {
            EngineEvent::TurnAppended { .. } => "turn_appended",
            EngineEvent::FieldCaptured { .. } => "field_captured",
            EngineEvent::SubmissionStarted { .. } => "submission_started",
            EngineEvent::LeadSubmitted { .. } => "lead_submitted",
            EngineEvent::SubmissionFailed { .. } => "submission_failed",
            EngineEvent::ConversationReset => "conversation_reset",
        }
    }
}

/// Fan-out of engine events. Publishing never blocks and never fails, even
/// with no subscribers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EngineEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_BUFFER);
        Self { sender }
    }

    pub fn publish(&self, event: EngineEvent) {
        // Err only means nobody is listening
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
