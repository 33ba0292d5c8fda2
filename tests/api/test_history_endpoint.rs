// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Tests for GET /history and GET /health.

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use rag_chat_node::{
    api::{build_router, AppState},
    embeddings::Embedder,
    inference::{AnswerGenerator, ChatMessage},
    rag::{RagPipeline, SYSTEM_PROMPT},
    vector::{RetrievedDocument, Retriever},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

struct StaticEmbedder;

#[async_trait]
impl Embedder for StaticEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![0.0; 3])
    }
}

struct EmptyRetriever;

#[async_trait]
impl Retriever for EmptyRetriever {
    async fn search(&self, _vector: &[f32], _top_k: usize) -> Result<Vec<RetrievedDocument>> {
        Ok(Vec::new())
    }
}

struct EchoGenerator;

#[async_trait]
impl AnswerGenerator for EchoGenerator {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String> {
        let question = messages.last().map(|m| m.content.as_str()).unwrap_or("");
        Ok(format!("You asked: {}", question))
    }
}

fn test_state() -> AppState {
    let pipeline = RagPipeline::new(
        Arc::new(StaticEmbedder),
        Arc::new(EmptyRetriever),
        Arc::new(EchoGenerator),
        SYSTEM_PROMPT.to_string(),
        3,
    );
    AppState::new(Arc::new(pipeline))
}

async fn get(state: &AppState, uri: &str) -> (StatusCode, String) {
    let response = build_router(state.clone())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_fresh_history_is_empty() {
    let state = test_state();
    let (status, body) = get(&state, "/history").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"history":[]}"#);
}

#[tokio::test]
async fn test_history_alternates_user_assistant_in_call_order() {
    let state = test_state();

    for uri in ["/chat?msg=one", "/chat?msg=two", "/chat?msg=three"] {
        let (status, _) = get(&state, uri).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = get(&state, "/history").await;
    assert_eq!(status, StatusCode::OK);

    let parsed: Value = serde_json::from_str(&body).unwrap();
    let history = parsed["history"].as_array().unwrap();

    // N chats produce exactly 2N turns, alternating user then assistant
    assert_eq!(history.len(), 6);
    for (i, entry) in history.iter().enumerate() {
        let expected = if i % 2 == 0 { "user" } else { "assistant" };
        assert_eq!(entry["type"], expected, "turn {} has wrong type", i);
    }
    assert_eq!(history[0]["content"], "one");
    assert_eq!(history[1]["content"], "You asked: one");
    assert_eq!(history[2]["content"], "two");
    assert_eq!(history[4]["content"], "three");
    assert_eq!(history[5]["content"], "You asked: three");
}

#[tokio::test]
async fn test_chat_response_body_equals_stored_assistant_turn() {
    let state = test_state();

    let (_, answer) = get(&state, "/chat?msg=hello").await;

    let (_, body) = get(&state, "/history").await;
    let parsed: Value = serde_json::from_str(&body).unwrap();
    let history = parsed["history"].as_array().unwrap();
    assert_eq!(history[1]["content"], answer.as_str());
}

#[tokio::test]
async fn test_repeated_history_reads_are_identical() {
    let state = test_state();
    let (_, _) = get(&state, "/chat?msg=hello").await;

    let (_, first) = get(&state, "/history").await;
    let (_, second) = get(&state, "/history").await;
    let (_, third) = get(&state, "/history").await;

    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[tokio::test]
async fn test_failed_chat_does_not_add_assistant_turn() {
    let state = test_state();

    // Validation failure leaves history untouched
    let (status, _) = get(&state, "/chat").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(&state, "/history").await;
    assert_eq!(body, r#"{"history":[]}"#);
}

#[tokio::test]
async fn test_health_endpoint() {
    let state = test_state();
    let (status, body) = get(&state, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["status"], "healthy");
    assert!(parsed["version"].is_string());
}
