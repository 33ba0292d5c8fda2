// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod pinecone;

pub use pinecone::PineconeClient;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Document returned by the vector store.
///
/// The store owns the content; this node treats `text` as an opaque context
/// blob and keeps the rest of the metadata untouched.
#[derive(Debug, Clone)]
pub struct RetrievedDocument {
    pub id: String,
    pub score: f32,
    pub text: String,
    pub metadata: Value,
}

/// Capability contract: top-k similarity search over a pre-existing index
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<RetrievedDocument>>;
}
