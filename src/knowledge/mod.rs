//! Knowledge base lookup
//!
//! The dialogue engine asks a [`KnowledgeBase`] whether an utterance matches a
//! known question before falling back to its own keyword rules. The lookup is a
//! trait so the scoring strategy can be swapped without touching the engine.
//!
//! # Bundled implementation
//!
//! [`FuzzyKnowledgeBase`] scores the query as an approximate substring of each
//! entry's keywords. See [`fuzzy`] for the scoring details.

pub mod fuzzy;
pub mod table;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use fuzzy::FuzzyKnowledgeBase;

/// Coarse intent attached to a knowledge entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentTag {
    Faq,
    ServiceQuery,
    PricingQuery,
    LeadCollection,
    GeneralQuery,
}

/// A canned answer and the phrases that trigger it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Grouping label, also matched against queries
    #[serde(default)]
    pub category: String,

    /// Trigger keywords and phrases
    pub keywords: Vec<String>,

    /// Answer spoken when this entry wins
    pub answer: String,

    pub intent: IntentTag,
}

impl KnowledgeEntry {
    pub fn new(
        category: impl Into<String>,
        keywords: &[&str],
        answer: impl Into<String>,
        intent: IntentTag,
    ) -> Self {
        Self {
            category: category.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            answer: answer.into(),
            intent,
        }
    }
}

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Knowledge base unavailable: {0}")]
    Unavailable(String),
}

/// Lookup capability consulted by the dialogue engine.
///
/// Implementations must be deterministic for a fixed table and query.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// Best matching entry for `text`, or `None` when nothing is close enough.
    async fn lookup(&self, text: &str) -> Result<Option<KnowledgeEntry>, KnowledgeError>;

    /// Number of entries, for startup logging
    fn len(&self) -> usize;
}
