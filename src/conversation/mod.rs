//! Conversation types: the turn log shown by the widget

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEntry {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Agent,
}

/// Append-only log of turns. Entries are never edited once written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnLog {
    entries: Vec<TurnEntry>,
}

impl TurnLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self, text: &str) -> &TurnEntry {
        self.push(Speaker::User, text)
    }

    pub fn add_agent(&mut self, text: &str) -> &TurnEntry {
        self.push(Speaker::Agent, text)
    }

    fn push(&mut self, speaker: Speaker, text: &str) -> &TurnEntry {
        self.entries.push(TurnEntry {
            speaker,
            text: text.to_string(),
            at: Utc::now(),
        });
        // just pushed
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[TurnEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
