// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use rag_chat_node::{
    api::{start_server, AppState},
    config::AppConfig,
    embeddings::{EmbeddingClient, EmbeddingConfig},
    inference::ChatCompletionClient,
    rag::{RagPipeline, SYSTEM_PROMPT},
    vector::PineconeClient,
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting RAG Chat Node...");
    println!("📦 BUILD VERSION: {}", rag_chat_node::version::VERSION);
    println!();

    // Fail fast on missing API keys
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    println!("🔢 Configuring embedding provider...");
    let embedder = EmbeddingClient::new(
        &config.openai_api_base,
        &config.openai_api_key,
        EmbeddingConfig {
            model: config.embedding_model.clone(),
            dimensions: Some(config.embedding_dimensions),
        },
    )
    .context("Failed to configure embedding client")?;
    println!("✅ Embedding provider ready ({})", config.embedding_model);

    // Bind to the pre-existing index; dies here if the name is wrong
    println!("🔍 Binding to vector index '{}'...", config.index_name);
    let retriever = PineconeClient::connect(
        &config.pinecone_api_key,
        &config.index_name,
        &config.pinecone_controller_url,
    )
    .await
    .context("Failed to bind to vector index")?;
    println!("✅ Vector index bound");

    println!("🧠 Configuring chat model...");
    let generator = ChatCompletionClient::new(
        &config.openai_api_base,
        &config.openai_api_key,
        &config.chat_model,
    )
    .context("Failed to configure chat model client")?;
    println!("✅ Chat model ready ({})", config.chat_model);

    let pipeline = RagPipeline::new(
        Arc::new(embedder),
        Arc::new(retriever),
        Arc::new(generator),
        SYSTEM_PROMPT.to_string(),
        config.top_k,
    );

    let state = AppState::new(Arc::new(pipeline));

    println!("🌐 Starting HTTP server on port {}...", config.api_port);
    start_server(state, config.api_port)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
