//! Intent resolution for idle turns
//!
//! Rules are tried in [`RULES`] order and the first one that fires decides
//! the intent; [`Intent::Fallback`] when none do.

use serde::Serialize;

use crate::knowledge::{IntentTag, KnowledgeEntry};

/// Phrases that mean "let's book"
pub const BOOKING_KEYWORDS: [&str; 6] = ["book", "hire", "start project", "yes", "schedule", "contact you"];

/// Generic mentions that imply a web build without naming a listed service
const WEB_HINTS: [&str; 3] = ["landing page", "website", "store"];

const QUESTION_KEYWORDS: [&str; 2] = ["question", "ask"];

pub const WEB_DESIGN_SERVICE: &str = "Web Design";
pub const ECOMMERCE_SERVICE: &str = "E-commerce";

/// What an idle utterance is trying to do
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Intent {
    /// Begin slot-filling from the first empty field
    StartCollection,
    /// Speak a canned knowledge base answer and stay idle
    Answer(String),
    /// Record the service, then begin slot-filling
    ServiceDetected(String),
    /// Invite a free-form question and stay idle
    InviteQuestion,
    /// Not understood; offer the suggestion menu
    Fallback,
}

/// Everything a rule may look at
#[derive(Debug, Clone, Copy)]
pub struct IntentInput<'a> {
    /// Lowercased utterance
    pub lower: &'a str,
    pub knowledge_hit: Option<&'a KnowledgeEntry>,
    /// Configured service names, original casing
    pub services: &'a [String],
}

pub type Rule = fn(&IntentInput<'_>) -> Option<Intent>;

/// Precedence order. First match wins.
pub const RULES: [(&str, Rule); 5] = [
    ("knowledge_lead", knowledge_lead),
    ("knowledge_answer", knowledge_answer),
    ("booking_keyword", booking_keyword),
    ("service_mention", service_mention),
    ("question", question),
];

pub fn resolve(input: &IntentInput<'_>) -> Intent {
    for (name, rule) in RULES {
        if let Some(intent) = rule(input) {
            tracing::debug!("Intent rule '{}' matched: {:?}", name, intent);
            return intent;
        }
    }

    tracing::debug!("No intent rule matched {:?}", input.lower);
    Intent::Fallback
}

fn knowledge_lead(input: &IntentInput<'_>) -> Option<Intent> {
    input
        .knowledge_hit
        .filter(|entry| entry.intent == IntentTag::LeadCollection)
        .map(|_| Intent::StartCollection)
}

fn knowledge_answer(input: &IntentInput<'_>) -> Option<Intent> {
    input
        .knowledge_hit
        .filter(|entry| entry.intent != IntentTag::LeadCollection)
        .map(|entry| Intent::Answer(entry.answer.clone()))
}

fn booking_keyword(input: &IntentInput<'_>) -> Option<Intent> {
    BOOKING_KEYWORDS
        .iter()
        .any(|k| input.lower.contains(k))
        .then_some(Intent::StartCollection)
}

fn service_mention(input: &IntentInput<'_>) -> Option<Intent> {
    if let Some(service) = input
        .services
        .iter()
        .find(|s| input.lower.contains(&s.to_lowercase()))
    {
        return Some(Intent::ServiceDetected(service.clone()));
    }

    if !WEB_HINTS.iter().any(|hint| input.lower.contains(hint)) {
        return None;
    }

    let service = if input.lower.contains("store") {
        ECOMMERCE_SERVICE
    } else {
        WEB_DESIGN_SERVICE
    };
    Some(Intent::ServiceDetected(service.to_string()))
}

fn question(input: &IntentInput<'_>) -> Option<Intent> {
    QUESTION_KEYWORDS
        .iter()
        .any(|k| input.lower.contains(k))
        .then_some(Intent::InviteQuestion)
}
