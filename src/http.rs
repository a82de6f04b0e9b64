use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::{orchestrator::ChatOrchestrator, types::ConversationTurn};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ChatOrchestrator>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default = "default_session")]
    pub session_id: String,
    pub content: String,
}

fn default_session() -> String {
    "local".to_owned()
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .route("/sessions/{id}/history", get(session_history))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Response, (StatusCode, String)> {
    let reply = state
        .orchestrator
        .handle_message(&request.session_id, &request.content)
        .await
        .map_err(internal_error)?;

    // Blank input is dropped without recording a turn.
    Ok(match reply {
        Some(reply) => Json(reply).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

async fn session_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ConversationTurn>>, StatusCode> {
    state
        .orchestrator
        .sessions()
        .history(&id)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

fn internal_error(error: anyhow::Error) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
}
