//! Forge Concierge - lead-collection chat agent API
//!
//! Serves a conversational concierge for an agency website. Visitors ask
//! questions, get canned answers from a fuzzy-matched knowledge base, and are
//! walked through a short form that ends in a submitted lead.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod conversation;
mod core;
mod knowledge;
mod routes;
mod sinks;

use config::Config;
use crate::core::SessionManager;
use knowledge::KnowledgeBase;
use sinks::{LeadSink, LogSink, SqliteSink, WebhookSink};

/// How often idle sessions are swept
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forge_concierge=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let agent = Arc::new(config.load_agent()?);
    tracing::info!(
        "🤖 Agent '{}' ready with {} service(s)",
        agent.agent.name,
        agent.dialogue.services.len()
    );

    let knowledge = agent.knowledge_base();
    tracing::info!("📚 Loaded {} knowledge base entries", knowledge.len());

    let sink: Arc<dyn LeadSink> = match &config.lead_webhook_url {
        _ if config.lead_sink.as_deref() == Some("log") => {
            tracing::info!("📮 Leads are only logged");
            Arc::new(LogSink)
        }
        Some(url) => {
            let timeout = Duration::from_secs(config.lead_webhook_timeout_secs);
            tracing::info!("📮 Leads go to webhook {}", url);
            Arc::new(WebhookSink::new(url.clone(), timeout)?)
        }
        None => {
            let db_path = config.data_dir.join("leads.db");
            tracing::info!("📮 Leads go to SQLite outbox at {}", db_path.display());
            Arc::new(SqliteSink::new(&db_path).await?)
        }
    };

    let sessions = Arc::new(SessionManager::new(
        agent,
        Arc::new(knowledge),
        sink,
        Duration::from_secs(config.session_ttl_secs),
    ));
    sessions.clone().spawn_sweeper(SWEEP_INTERVAL);

    let app = Router::new()
        .merge(routes::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(sessions);

    tracing::info!("🔥 Concierge API running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
