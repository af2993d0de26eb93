//! Application configuration

pub mod agent;
pub mod prompts;

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use agent::{AgentConfig, ConfigError};
pub use prompts::{Messages, PromptTable};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Agent TOML file; built-in defaults when unset
    pub agent_config: Option<PathBuf>,
    pub data_dir: PathBuf,
    /// Where completed leads are POSTed; SQLite outbox when unset
    pub lead_webhook_url: Option<String>,
    pub lead_webhook_timeout_secs: u64,
    /// `log` forces the logging sink, for local development
    pub lead_sink: Option<String>,
    pub session_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            agent_config: env::var("CONCIERGE_AGENT_CONFIG").ok().map(PathBuf::from),
            data_dir: env::var("CONCIERGE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            lead_webhook_url: env::var("LEAD_WEBHOOK_URL").ok().filter(|u| !u.is_empty()),
            lead_webhook_timeout_secs: env::var("LEAD_WEBHOOK_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(15),
            lead_sink: env::var("LEAD_SINK").ok().map(|s| s.to_lowercase()),
            session_ttl_secs: env::var("SESSION_TTL_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(30 * 60),
        })
    }

    /// Agent configuration from the configured file, or defaults
    pub fn load_agent(&self) -> Result<AgentConfig, ConfigError> {
        match &self.agent_config {
            Some(path) => AgentConfig::from_file(path),
            None => Ok(AgentConfig::default()),
        }
    }
}
