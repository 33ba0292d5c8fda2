// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod embeddings;
pub mod inference;
pub mod rag;
pub mod session;
pub mod vector;
pub mod version;

// Re-export main types
pub use api::{ApiError, AppState, ErrorResponse};
pub use config::{AppConfig, ConfigError};
pub use embeddings::{Embedder, EmbeddingClient, EmbeddingConfig};
pub use inference::{AnswerGenerator, ChatCompletionClient, ChatMessage};
pub use rag::{RagPipeline, SYSTEM_PROMPT};
pub use session::{ConversationSession, ConversationTurn, Role};
pub use vector::{PineconeClient, RetrievedDocument, Retriever};
