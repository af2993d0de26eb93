//! Lead-collection dialogue engine
//!
//! The DialogueEngine turns visitor utterances into replies. Each turn:
//! 1. Logs the utterance
//! 2. Honors `cancel` / `stop` / `reset` before anything else
//! 3. While collecting, stores the utterance verbatim in the pending field
//! 4. While idle, resolves an intent (knowledge base first, then keyword rules)
//! 5. Asks for the next empty field, or submits the lead once none is left
//! 6. Logs the reply
//!
//! The engine owns its lead and state exclusively. `handle` takes `&mut self`,
//! so turns never overlap; callers that share an engine queue on a lock.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::config::AgentConfig;
use crate::conversation::TurnLog;
use crate::knowledge::KnowledgeBase;
use crate::sinks::LeadSink;

use super::events::{EngineEvent, EventBus};
use super::extract;
use super::intent::{self, Intent, IntentInput};
use super::lead::{Lead, LeadField};

/// Utterances that wipe the conversation, matched case-insensitively
const RESET_COMMANDS: [&str; 3] = ["cancel", "stop", "reset"];

/// Resubmits a lead whose submission failed
const RETRY_COMMAND: &str = "retry";

const BOOK_A_CALL: &str = "Book a Call";
const JUST_A_QUESTION: &str = "Just a Question";

/// Engine control state. The pending field lives inside `Collecting`, so a
/// pending field without collection cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Collecting(LeadField),
    Submitting,
}

impl Mode {
    pub fn pending_field(&self) -> Option<LeadField> {
        match self {
            Mode::Collecting(field) => Some(*field),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Idle => "IDLE",
            Mode::Collecting(_) => "COLLECTING",
            Mode::Submitting => "SUBMITTING",
        }
    }
}

/// What the engine says back for one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReply {
    pub text: String,
    /// Selectable quick replies for the next turn
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl TurnReply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            suggestions: Vec::new(),
        }
    }

    fn with_suggestions(text: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            text: text.into(),
            suggestions,
        }
    }
}

/// Errors from the dialogue engine
#[derive(Debug, thiserror::Error)]
pub enum DialogueError {
    #[error("Utterance is empty")]
    EmptyUtterance,
}

pub struct DialogueEngine {
    config: Arc<AgentConfig>,
    knowledge: Arc<dyn KnowledgeBase>,
    sink: Arc<dyn LeadSink>,
    lead: Lead,
    mode: Mode,
    log: TurnLog,
    /// Lead being submitted, or whose last submission failed; kept for an
    /// explicit retry
    retained: Option<Lead>,
    suggestions: Vec<String>,
    events: EventBus,
}

impl DialogueEngine {
    pub fn new(
        config: Arc<AgentConfig>,
        knowledge: Arc<dyn KnowledgeBase>,
        sink: Arc<dyn LeadSink>,
    ) -> Self {
        Self {
            config,
            knowledge,
            sink,
            lead: Lead::new(),
            mode: Mode::Idle,
            log: TurnLog::new(),
            retained: None,
            suggestions: Vec::new(),
            events: EventBus::new(),
        }
    }

    /// Opening message. Logged as an agent turn.
    pub fn greet(&mut self) -> TurnReply {
        let reply = TurnReply::with_suggestions(
            self.config.messages.greeting.clone(),
            self.config.dialogue.opening_suggestions.clone(),
        );
        self.finish(&reply);
        reply
    }

    /// Process one utterance to completion
    pub async fn handle(&mut self, utterance: &str) -> Result<TurnReply, DialogueError> {
        let text = utterance.trim();
        if text.is_empty() {
            return Err(DialogueError::EmptyUtterance);
        }

        if self.mode == Mode::Submitting {
            // a previous turn was dropped mid-submission; `submit` left the
            // lead in `retained`
            tracing::warn!("Recovering from an interrupted submission; lead kept for retry");
            self.mode = Mode::Idle;
        }

        self.suggestions.clear();
        let entry = self.log.add_user(text).clone();
        self.events.publish(EngineEvent::TurnAppended { entry });

        let lower = text.to_lowercase();

        let reply = if RESET_COMMANDS.contains(&lower.as_str()) {
            self.reset();
            TurnReply::text(self.config.messages.reset.clone())
        } else if let Mode::Collecting(field) = self.mode {
            self.capture(field, text);
            self.advance(None).await
        } else if lower == RETRY_COMMAND && self.retained.is_some() {
            self.retry().await
        } else {
            self.resolve_idle(text, &lower).await
        };

        self.finish(&reply);
        Ok(reply)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn pending_field(&self) -> Option<LeadField> {
        self.mode.pending_field()
    }

    pub fn lead(&self) -> &Lead {
        &self.lead
    }

    pub fn retained_lead(&self) -> Option<&Lead> {
        self.retained.as_ref()
    }

    pub fn log(&self) -> &TurnLog {
        &self.log
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.events
    }

    /// Input placeholder for the widget
    pub fn placeholder(&self) -> String {
        match self.mode {
            Mode::Collecting(field) => format!("Enter your {}...", field.label()),
            _ => "Ask anything...".to_string(),
        }
    }

    fn finish(&mut self, reply: &TurnReply) {
        self.suggestions = reply.suggestions.clone();
        let entry = self.log.add_agent(&reply.text).clone();
        self.events.publish(EngineEvent::TurnAppended { entry });
    }

    fn reset(&mut self) {
        tracing::debug!("Conversation reset");
        self.lead.clear();
        self.retained = None;
        self.mode = Mode::Idle;
        self.events.publish(EngineEvent::ConversationReset);
    }

    fn capture(&mut self, field: LeadField, value: &str) {
        self.lead.set(field, value);
        self.events.publish(EngineEvent::FieldCaptured {
            field,
            value: value.to_string(),
        });
    }

    async fn resolve_idle(&mut self, text: &str, lower: &str) -> TurnReply {
        if self.config.dialogue.capture_free_text {
            for (field, value) in extract::fill_empty(&mut self.lead, text) {
                tracing::debug!("Captured {} from free text", field);
                self.events.publish(EngineEvent::FieldCaptured { field, value });
            }
        }

        let hit = match self.knowledge.lookup(lower).await {
            Ok(hit) => hit,
            Err(e) => {
                tracing::warn!("Knowledge base lookup failed, using keyword rules: {}", e);
                None
            }
        };

        let intent = intent::resolve(&IntentInput {
            lower,
            knowledge_hit: hit.as_ref(),
            services: &self.config.dialogue.services,
        });

        match intent {
            Intent::StartCollection => {
                let intro = self.config.messages.collection_intro.clone();
                self.advance(Some(intro)).await
            }
            Intent::Answer(answer) => TurnReply::text(answer),
            Intent::ServiceDetected(service) => {
                let intro = self.config.messages.service_ack(&service);
                self.capture(LeadField::Service, &service);
                self.advance(Some(intro)).await
            }
            Intent::InviteQuestion => TurnReply::text(self.config.messages.invite_question.clone()),
            Intent::Fallback => {
                TurnReply::with_suggestions(self.config.messages.fallback.clone(), self.fallback_menu())
            }
        }
    }

    /// Ask for the next empty field, or submit when there is none
    async fn advance(&mut self, intro: Option<String>) -> TurnReply {
        match self.lead.next_missing() {
            Some(field) => {
                self.mode = Mode::Collecting(field);
                let prompt = self.config.prompts.for_field(field);
                TurnReply::text(join(intro.as_deref(), prompt))
            }
            None => {
                let lead = std::mem::take(&mut self.lead);
                let preface = join(intro.as_deref(), &self.config.messages.submitting);
                self.submit(lead, preface).await
            }
        }
    }

    async fn retry(&mut self) -> TurnReply {
        match self.retained.take() {
            Some(lead) => {
                let preface = self.config.messages.retrying.clone();
                self.submit(lead, preface).await
            }
            None => TurnReply::text(self.config.messages.invite_question.clone()),
        }
    }

    /// One sink call; back to idle whatever happens. The lead sits in
    /// `retained` until the sink succeeds, so a dropped turn cannot lose it.
    async fn submit(&mut self, lead: Lead, preface: String) -> TurnReply {
        self.mode = Mode::Submitting;
        self.events.publish(EngineEvent::SubmissionStarted { lead: lead.clone() });
        tracing::info!("Submitting lead for {} via {} sink", lead.email, self.sink.name());
        self.retained = Some(lead.clone());

        let outcome = self.sink.submit(&lead).await;
        self.mode = Mode::Idle;

        match outcome {
            Ok(()) => {
                self.retained = None;
                self.events.publish(EngineEvent::LeadSubmitted { lead });
                TurnReply::text(join(Some(preface.as_str()), &self.config.messages.submitted))
            }
            Err(e) => {
                tracing::warn!("Lead submission failed: {}", e);
                self.events.publish(EngineEvent::SubmissionFailed {
                    reason: e.to_string(),
                });
                TurnReply::text(join(Some(preface.as_str()), &self.config.messages.submission_failed))
            }
        }
    }

    fn fallback_menu(&self) -> Vec<String> {
        self.config
            .dialogue
            .services
            .iter()
            .cloned()
            .chain([BOOK_A_CALL.to_string(), JUST_A_QUESTION.to_string()])
            .collect()
    }
}

fn join(first: Option<&str>, second: &str) -> String {
    match first {
        Some(first) if !first.is_empty() => format!("{} {}", first, second),
        _ => second.to_string(),
    }
}
