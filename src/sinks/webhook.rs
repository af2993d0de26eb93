//! Webhook sink: POSTs the lead as JSON to the contact-form backend

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{LeadSink, SubmissionError};
use crate::core::Lead;

pub struct WebhookSink {
    client: Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SubmissionError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl LeadSink for WebhookSink {
    async fn submit(&self, lead: &Lead) -> Result<(), SubmissionError> {
        let response = self.client.post(&self.url).json(lead).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SubmissionError::Rejected(format!("{}: {}", status, body)));
        }

        tracing::debug!("Lead for {} accepted by {}", lead.email, self.url);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use tokio_test::assert_err;

    /// Serves `status` on `/leads` and records every body received
    async fn spawn_backend(status: StatusCode) -> (String, Arc<Mutex<Vec<Value>>>) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();

        let app = Router::new().route(
            "/leads",
            post(move |Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    sink.lock().unwrap().push(body);
                    status
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/leads", addr), received)
    }

    fn lead() -> Lead {
        Lead {
            name: "Ada".into(),
            business_name: "Personal".into(),
            service: "Web Design".into(),
            budget: "$3k".into(),
            timeline: "2 weeks".into(),
            phone: "5551234567".into(),
            email: "ada@example.com".into(),
            details: "Portfolio".into(),
        }
    }

    #[tokio::test]
    async fn test_posts_camel_case_lead() {
        let (url, received) = spawn_backend(StatusCode::OK).await;
        let sink = WebhookSink::new(url, Duration::from_secs(5)).unwrap();

        sink.submit(&lead()).await.unwrap();

        let bodies = received.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["businessName"], "Personal");
        assert_eq!(bodies[0]["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn test_non_success_is_rejected() {
        let (url, _) = spawn_backend(StatusCode::INTERNAL_SERVER_ERROR).await;
        let sink = WebhookSink::new(url, Duration::from_secs(5)).unwrap();

        let err = assert_err!(sink.submit(&lead()).await);
        assert!(matches!(err, SubmissionError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        // port 9 (discard) is not listening on test machines
        let sink = WebhookSink::new("http://127.0.0.1:9/leads", Duration::from_secs(2)).unwrap();

        let err = assert_err!(sink.submit(&lead()).await);
        assert!(matches!(err, SubmissionError::RequestFailed(_)));
    }
}
