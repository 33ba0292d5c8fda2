// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Route handlers for the chat front-end.
//!
//! The `/chat` contract is deliberately asymmetric: success returns the bare
//! answer string while failures return a JSON error body. Existing callers
//! depend on that shape.

use axum::{
    extract::{Form, Query, State},
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use super::{ApiError, AppState};
use crate::session::ConversationTurn;
use crate::version::VERSION;

const CHAT_PAGE: &str = include_str!("../../templates/chat.html");
const MISSING_MSG_ERROR: &str = "Missing 'msg' parameter";

/// `msg` may arrive via query string or form body on either method
#[derive(Debug, Clone, Deserialize)]
pub struct ChatParams {
    pub msg: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub entry_type: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET / - static chat page
pub async fn index_handler() -> Html<&'static str> {
    Html(CHAT_PAGE)
}

/// GET /chat - `msg` from the query string
pub async fn chat_get(
    State(state): State<AppState>,
    Query(params): Query<ChatParams>,
) -> Result<String, ApiError> {
    run_chat(state, params.msg).await
}

/// POST /chat - `msg` from the query string first, then the form body
pub async fn chat_post(
    State(state): State<AppState>,
    Query(query): Query<ChatParams>,
    form: Option<Form<ChatParams>>,
) -> Result<String, ApiError> {
    let msg = query
        .msg
        .filter(|m| !m.is_empty())
        .or_else(|| form.and_then(|Form(params)| params.msg));
    run_chat(state, msg).await
}

/// Shared chat flow: validate, append user turn, run the pipeline with the
/// full buffered history, append the assistant turn, return the answer.
async fn run_chat(state: AppState, msg: Option<String>) -> Result<String, ApiError> {
    let msg = msg
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::MissingParameter(MISSING_MSG_ERROR.to_string()))?;

    let request_id = Uuid::new_v4();
    info!(%request_id, "User input: {}", msg);

    // Append before invoking, so the pipeline sees the full buffered history
    let history = {
        let mut session = state.session.write().await;
        session.push(ConversationTurn::user(&msg));
        session.turns().to_vec()
    };

    let answer = state.pipeline.answer(&msg, &history).await.map_err(|e| {
        error!(%request_id, "Chat pipeline failed: {:#}", e);
        ApiError::InternalError(e.to_string())
    })?;

    info!(%request_id, "Response: {}", answer);
    state
        .session
        .write()
        .await
        .push(ConversationTurn::assistant(&answer));

    Ok(answer)
}

/// GET /history - full conversation in arrival order
pub async fn history_handler(State(state): State<AppState>) -> Json<HistoryResponse> {
    let session = state.session.read().await;
    let history = session
        .turns()
        .iter()
        .map(|turn| HistoryEntry {
            entry_type: turn.role.as_str().to_string(),
            content: turn.content.clone(),
        })
        .collect();

    Json(HistoryResponse { history })
}

/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: VERSION.to_string(),
    })
}
