//! API routes

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Json, Response,
    },
    routing::{get, post},
    Router,
};
use futures::Stream;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use crate::core::{DialogueError, SessionError, SessionManager, SessionSnapshot, TurnOutcome};

pub type SharedSessions = Arc<SessionManager>;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct CreatedSession {
    id: Uuid,
    #[serde(flatten)]
    greeting: TurnOutcome,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Dialogue(#[from] DialogueError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Session(SessionError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Dialogue(DialogueError::EmptyUtterance) => StatusCode::BAD_REQUEST,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn create_session(State(sessions): State<SharedSessions>) -> (StatusCode, Json<CreatedSession>) {
    let (session, greeting) = sessions.create().await;
    (
        StatusCode::CREATED,
        Json(CreatedSession {
            id: session.id,
            greeting,
        }),
    )
}

async fn post_message(
    State(sessions): State<SharedSessions>,
    Path(id): Path<Uuid>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<TurnOutcome>, ApiError> {
    let session = sessions.get(id).await?;
    let outcome = session.handle(&request.text).await?;
    Ok(Json(outcome))
}

async fn get_session(
    State(sessions): State<SharedSessions>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let session = sessions.get(id).await?;
    Ok(Json(session.snapshot().await))
}

async fn delete_session(
    State(sessions): State<SharedSessions>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Engine events as server-sent events. Ends when the session is dropped.
async fn session_events(
    State(sessions): State<SharedSessions>,
    Path(id): Path<Uuid>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static>, ApiError> {
    use async_stream::stream;

    let mut rx = sessions.get(id).await?.subscribe();
    let stream = stream! {
        loop {
            match rx.recv().await {
                Ok(event) => match Event::default().event(event.name()).json_data(&event) {
                    Ok(sse) => yield Ok(sse),
                    Err(e) => tracing::warn!("Failed to encode {} event: {}", event.name(), e),
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Event stream for session {} skipped {} event(s)", id, skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

pub fn router() -> Router<SharedSessions> {
    Router::new()
        .route("/health", get(health))
        .route("/v1/sessions", post(create_session))
        .route("/v1/sessions/:id", get(get_session).delete(delete_session))
        .route("/v1/sessions/:id/messages", post(post_message))
        .route("/v1/sessions/:id/events", get(session_events))
}
