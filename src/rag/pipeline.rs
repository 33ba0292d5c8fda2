// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fixed retrieve-then-answer composition over the hosted providers

use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::embeddings::Embedder;
use crate::inference::AnswerGenerator;
use crate::rag::prompt;
use crate::session::ConversationTurn;
use crate::vector::Retriever;

/// Composes embedding, similarity search, and answer synthesis.
///
/// Providers are held behind capability traits so concrete services can be
/// swapped without touching the pipeline. The composition itself has no
/// branching, no caching, and no fallback path: a failure at any step
/// propagates to the caller.
pub struct RagPipeline {
    embedder: Arc<dyn Embedder>,
    retriever: Arc<dyn Retriever>,
    generator: Arc<dyn AnswerGenerator>,
    system_prompt: String,
    top_k: usize,
}

impl RagPipeline {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        retriever: Arc<dyn Retriever>,
        generator: Arc<dyn AnswerGenerator>,
        system_prompt: String,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            retriever,
            generator,
            system_prompt,
            top_k,
        }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Answer one question grounded in retrieved context.
    ///
    /// `history` is the full buffered conversation, including the user turn
    /// for `message` appended by the caller.
    pub async fn answer(&self, message: &str, history: &[ConversationTurn]) -> Result<String> {
        let vector = self.embedder.embed(message).await?;
        let docs = self.retriever.search(&vector, self.top_k).await?;
        debug!("Retrieved {} context documents", docs.len());

        let messages = prompt::build_messages(&self.system_prompt, &docs, history, message);
        self.generator.generate(&messages).await
    }
}
