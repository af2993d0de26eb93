//! Agent configuration loaded from TOML files
//!
//! Each deployed concierge has an agent configuration that defines:
//! - Who the agent is and which agency it speaks for
//! - Which services it recognizes in free text
//! - Knowledge base tuning and extra entries
//! - Prompt and message wording

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::prompts::{Messages, PromptTable};
use crate::knowledge::{fuzzy, FuzzyKnowledgeBase, KnowledgeEntry};

/// Root agent configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Agent identity
    #[serde(default)]
    pub agent: AgentInfo,

    /// Dialogue behaviour
    #[serde(default)]
    pub dialogue: DialogueConfig,

    /// Knowledge base configuration
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Per-field questions
    #[serde(default)]
    pub prompts: PromptTable,

    /// Other engine wording
    #[serde(default)]
    pub messages: Messages,
}

impl AgentConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: AgentConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.knowledge.threshold) {
            return Err(ConfigError::Validation(format!(
                "knowledge.threshold must be within 0.0..=1.0, got {}",
                self.knowledge.threshold
            )));
        }

        if self.dialogue.services.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "dialogue.services must not contain blank names".to_string(),
            ));
        }

        for (i, entry) in self.knowledge.entries.iter().enumerate() {
            if entry.keywords.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "knowledge.entries[{}] has no keywords",
                    i
                )));
            }
        }

        Ok(())
    }

    /// Build the knowledge base this configuration describes
    pub fn knowledge_base(&self) -> FuzzyKnowledgeBase {
        let base = if self.knowledge.include_defaults {
            FuzzyKnowledgeBase::with_defaults()
        } else {
            FuzzyKnowledgeBase::new(Vec::new())
        };

        base.with_threshold(self.knowledge.threshold)
            .with_entries(self.knowledge.entries.iter().cloned())
    }
}

/// Agent identification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInfo {
    /// Display name shown in the widget header
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Agency the agent represents
    #[serde(default)]
    pub agency: Option<String>,
}

fn default_agent_name() -> String {
    "Concierge".to_string()
}

impl Default for AgentInfo {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            agency: None,
        }
    }
}

/// Dialogue behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueConfig {
    /// Services recognized by name in free text, also offered as suggestions
    #[serde(default = "default_services")]
    pub services: Vec<String>,

    /// Pull name/email/phone/budget/timeline out of free sentences while idle
    #[serde(default)]
    pub capture_free_text: bool,

    /// Suggestions offered right after the greeting
    #[serde(default = "default_opening_suggestions")]
    pub opening_suggestions: Vec<String>,
}

fn default_services() -> Vec<String> {
    vec![
        "Web Design".to_string(),
        "Custom Web App".to_string(),
        "AI Agent".to_string(),
        "SEO / Marketing".to_string(),
    ]
}

fn default_opening_suggestions() -> Vec<String> {
    vec!["Yes, book a call".to_string(), "Just have a question".to_string()]
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            services: default_services(),
            capture_free_text: false,
            opening_suggestions: default_opening_suggestions(),
        }
    }
}

/// Knowledge base configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Keep the built-in agency FAQ table
    #[serde(default = "default_true")]
    pub include_defaults: bool,

    /// Match threshold (0.0 exact only, 1.0 anything)
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Extra entries, searched after the built-in ones
    #[serde(default)]
    pub entries: Vec<KnowledgeEntry>,
}

fn default_true() -> bool {
    true
}

fn default_threshold() -> f64 {
    fuzzy::DEFAULT_THRESHOLD
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            include_defaults: true,
            threshold: default_threshold(),
            entries: Vec::new(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{IntentTag, KnowledgeBase};

    const SAMPLE_CONFIG: &str = r#"
[agent]
name = "Harbor"
agency = "Harbor Digital"

[dialogue]
services = ["Web Design", "Brand Identity"]
capture_free_text = true

[knowledge]
threshold = 0.3

[[knowledge.entries]]
category = "Warranty"
keywords = ["warranty", "guarantee"]
answer = "Every build ships with 30 days of free fixes."
intent = "FAQ"

[prompts]
email = "Where can we email you?"

[messages]
service_ack = "{service}, nice choice."
"#;

    #[test]
    fn test_parse_config() {
        let config = AgentConfig::from_str(SAMPLE_CONFIG).unwrap();

        assert_eq!(config.agent.name, "Harbor");
        assert_eq!(config.agent.agency.as_deref(), Some("Harbor Digital"));
        assert_eq!(config.dialogue.services, vec!["Web Design", "Brand Identity"]);
        assert!(config.dialogue.capture_free_text);
        assert_eq!(config.knowledge.threshold, 0.3);
        assert_eq!(config.knowledge.entries.len(), 1);
        assert_eq!(config.knowledge.entries[0].intent, IntentTag::Faq);
        assert_eq!(config.prompts.email, "Where can we email you?");
        assert_eq!(config.messages.service_ack("Web Design"), "Web Design, nice choice.");
        // untouched keys keep their defaults
        assert_eq!(config.messages.reset, crate::config::prompts::builtin::RESET);
    }

    #[test]
    fn test_minimal_config() {
        let config = AgentConfig::from_str("").unwrap();

        assert_eq!(config.agent.name, "Concierge");
        assert_eq!(config.dialogue.services.len(), 4);
        assert!(!config.dialogue.capture_free_text);
        assert!(config.knowledge.include_defaults);
        assert_eq!(config.knowledge.threshold, fuzzy::DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let err = AgentConfig::from_str("[knowledge]\nthreshold = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_rejects_entry_without_keywords() {
        let content = r#"
[[knowledge.entries]]
keywords = []
answer = "nothing"
intent = "FAQ"
"#;
        let err = AgentConfig::from_str(content).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[tokio::test]
    async fn test_knowledge_base_from_config() {
        let config = AgentConfig::from_str(SAMPLE_CONFIG).unwrap();
        let kb = config.knowledge_base();

        assert_eq!(kb.len(), crate::knowledge::table::default_entries().len() + 1);

        let hit = kb.lookup("guarantee").await.unwrap().unwrap();
        assert_eq!(hit.category, "Warranty");
    }
}
