//! Session registry
//!
//! One dialogue engine per visitor session. Each engine sits behind its own
//! async mutex, so utterances for a session run one after another while
//! different sessions proceed independently.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{broadcast, Mutex, RwLock};
use uuid::Uuid;

use crate::config::AgentConfig;
use crate::conversation::TurnEntry;
use crate::knowledge::KnowledgeBase;
use crate::sinks::LeadSink;

use super::engine::{DialogueEngine, DialogueError, TurnReply};
use super::events::{EngineEvent, EventBus};
use super::lead::LeadField;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(Uuid),
}

/// Result of one turn, as handed to the widget
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub reply: String,
    pub suggestions: Vec<String>,
    pub mode: &'static str,
    pub pending_field: Option<LeadField>,
    pub placeholder: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub mode: &'static str,
    pub pending_field: Option<LeadField>,
    pub suggestions: Vec<String>,
    pub turns: Vec<TurnEntry>,
    pub created_at: DateTime<Utc>,
}

pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    engine: Mutex<DialogueEngine>,
    events: EventBus,
    /// Unix millis of the last access
    last_active: AtomicI64,
}

impl Session {
    fn new(engine: DialogueEngine) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            events: engine.event_bus().clone(),
            engine: Mutex::new(engine),
            last_active: AtomicI64::new(now.timestamp_millis()),
        }
    }

    fn touch(&self) {
        self.last_active
            .store(Utc::now().timestamp_millis(), Ordering::Relaxed);
    }

    fn idle_for(&self, now: DateTime<Utc>) -> Duration {
        let idle = now.timestamp_millis() - self.last_active.load(Ordering::Relaxed);
        Duration::from_millis(idle.max(0) as u64)
    }

    /// Run one turn. Waits behind any turn already in progress.
    pub async fn handle(&self, text: &str) -> Result<TurnOutcome, DialogueError> {
        let mut engine = self.engine.lock().await;
        let reply = engine.handle(text).await?;
        self.touch();
        Ok(outcome(&engine, reply))
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let engine = self.engine.lock().await;
        SessionSnapshot {
            id: self.id,
            mode: engine.mode().as_str(),
            pending_field: engine.pending_field(),
            suggestions: engine.suggestions().to_vec(),
            turns: engine.log().entries().to_vec(),
            created_at: self.created_at,
        }
    }

    /// Engine events; does not wait for a running turn
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

fn outcome(engine: &DialogueEngine, reply: TurnReply) -> TurnOutcome {
    TurnOutcome {
        reply: reply.text,
        suggestions: reply.suggestions,
        mode: engine.mode().as_str(),
        pending_field: engine.pending_field(),
        placeholder: engine.placeholder(),
    }
}

pub struct SessionManager {
    config: Arc<AgentConfig>,
    knowledge: Arc<dyn KnowledgeBase>,
    sink: Arc<dyn LeadSink>,
    ttl: Duration,
    sessions: RwLock<HashMap<Uuid, Arc<Session>>>,
}

impl SessionManager {
    pub fn new(
        config: Arc<AgentConfig>,
        knowledge: Arc<dyn KnowledgeBase>,
        sink: Arc<dyn LeadSink>,
        ttl: Duration,
    ) -> Self {
        Self {
            config,
            knowledge,
            sink,
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Start a session and return it with its greeting
    pub async fn create(&self) -> (Arc<Session>, TurnOutcome) {
        let mut engine = DialogueEngine::new(
            self.config.clone(),
            self.knowledge.clone(),
            self.sink.clone(),
        );
        let greeting = engine.greet();
        let greeting = outcome(&engine, greeting);

        let session = Arc::new(Session::new(engine));
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());

        tracing::debug!("Session {} created", session.id);
        (session, greeting)
    }

    pub async fn get(&self, id: Uuid) -> Result<Arc<Session>, SessionError> {
        let session = self
            .sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound(id))?;
        session.touch();
        Ok(session)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), SessionError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| tracing::debug!("Session {} removed", id))
            .ok_or(SessionError::NotFound(id))
    }

    /// Drop sessions idle for at least the TTL, returning how many went
    pub async fn evict_idle(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.idle_for(now) < self.ttl);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Periodically evict idle sessions
    pub fn spawn_sweeper(self: Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let evicted = self.evict_idle().await;
                if evicted > 0 {
                    tracing::info!("🧹 Evicted {} idle session(s)", evicted);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::FuzzyKnowledgeBase;
    use crate::sinks::LogSink;
    use tokio_test::assert_err;

    fn manager(ttl: Duration) -> SessionManager {
        SessionManager::new(
            Arc::new(AgentConfig::default()),
            Arc::new(FuzzyKnowledgeBase::with_defaults()),
            Arc::new(LogSink),
            ttl,
        )
    }

    #[tokio::test]
    async fn test_create_greets() {
        let sessions = manager(Duration::from_secs(60));

        let (session, greeting) = sessions.create().await;

        assert_eq!(greeting.mode, "IDLE");
        assert_eq!(greeting.suggestions, vec!["Yes, book a call", "Just have a question"]);
        assert_eq!(session.snapshot().await.turns.len(), 1);
        assert_eq!(sessions.len().await, 1);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let sessions = manager(Duration::from_secs(60));
        let (a, _) = sessions.create().await;
        let (b, _) = sessions.create().await;

        let turn = a.handle("book a call").await.unwrap();

        assert_eq!(turn.mode, "COLLECTING");
        assert_eq!(turn.pending_field, Some(LeadField::Name));
        assert_eq!(b.snapshot().await.mode, "IDLE");
    }

    #[tokio::test]
    async fn test_unknown_and_removed_sessions() {
        let sessions = manager(Duration::from_secs(60));
        let (session, _) = sessions.create().await;

        assert!(sessions.get(session.id).await.is_ok());
        sessions.remove(session.id).await.unwrap();

        let err = assert_err!(sessions.get(session.id).await);
        assert!(matches!(err, SessionError::NotFound(id) if id == session.id));
        assert_err!(sessions.remove(session.id).await);
    }

    #[tokio::test]
    async fn test_session_debug_skips_engine() {
        let sessions = manager(Duration::from_secs(60));
        let (session, _) = sessions.create().await;

        let debug = format!("{:?}", sessions.get(session.id).await);

        assert!(debug.contains(&session.id.to_string()));
        assert!(!debug.contains("engine"));
    }

    #[tokio::test]
    async fn test_evict_idle() {
        let sessions = manager(Duration::from_secs(3600));
        sessions.create().await;
        assert_eq!(sessions.evict_idle().await, 0);

        let sessions = manager(Duration::ZERO);
        sessions.create().await;
        sessions.create().await;
        assert_eq!(sessions.evict_idle().await, 2);
        assert_eq!(sessions.len().await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_turns_queue() {
        let sessions = manager(Duration::from_secs(60));
        let (session, _) = sessions.create().await;

        let first = session.clone();
        let second = session.clone();
        let (a, b) = tokio::join!(first.handle("book a call"), second.handle("Ada"));
        a.unwrap();
        b.unwrap();

        // whichever ran first, both turns are logged whole
        assert_eq!(session.snapshot().await.turns.len(), 5);
    }

    #[tokio::test]
    async fn test_subscribe_sees_turns() {
        let sessions = manager(Duration::from_secs(60));
        let (session, _) = sessions.create().await;
        let mut rx = session.subscribe();

        session.handle("hello").await.unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.name(), "turn_appended");
    }
}
