//! Lead submission sinks

mod sqlite;
mod webhook;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::Lead;

pub use sqlite::SqliteSink;
pub use webhook::WebhookSink;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Rejected by backend: {0}")]
    Rejected(String),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Sink unavailable: {0}")]
    Unavailable(String),
}

/// Delivers a completed lead. Called exactly once per completed lead; the
/// engine never retries on its own.
#[async_trait]
pub trait LeadSink: Send + Sync {
    async fn submit(&self, lead: &Lead) -> Result<(), SubmissionError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Logs the lead and accepts it. For local development.
#[derive(Debug, Default, Clone)]
pub struct LogSink;

#[async_trait]
impl LeadSink for LogSink {
    async fn submit(&self, lead: &Lead) -> Result<(), SubmissionError> {
        tracing::info!(
            "📨 New lead: {} <{}> - {} ({})",
            lead.name,
            lead.email,
            lead.service,
            lead.budget
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_log_sink_accepts() {
        let lead = Lead {
            name: "Ada".into(),
            ..Lead::default()
        };
        assert_ok!(LogSink.submit(&lead).await);
    }
}
