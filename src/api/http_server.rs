use axum::{
    routing::get,
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

use super::handlers::{chat_get, chat_post, health_handler, history_handler, index_handler};
use crate::rag::RagPipeline;
use crate::session::ConversationSession;

/// Shared request state: the process-wide conversation session and the
/// retrieval pipeline. Constructed once at startup and injected into every
/// handler; there is no module-level singleton.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<ConversationSession>>,
    pub pipeline: Arc<RagPipeline>,
}

impl AppState {
    pub fn new(pipeline: Arc<RagPipeline>) -> Self {
        Self {
            session: Arc::new(RwLock::new(ConversationSession::new())),
            pipeline,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Chat page
        .route("/", get(index_handler))
        // Chat endpoint, msg via query string or form body
        .route("/chat", get(chat_get).post(chat_post))
        // Conversation history
        .route("/history", get(history_handler))
        // Health check
        .route("/health", get(health_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Chat server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
