// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Embedding provider adapter for an OpenAI-compatible /v1/embeddings API

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

// --- OpenAI-compatible serde structs ---

#[derive(serde::Serialize)]
struct EmbeddingsRequest {
    model: String,
    input: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(serde::Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(serde::Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Capability contract: turn text into a vector for similarity search
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub model: String,
    /// Requested output width; must match the bound index
    pub dimensions: Option<usize>,
}

/// Client for a hosted embedding endpoint
pub struct EmbeddingClient {
    client: Client,
    base_url: String,
    api_key: String,
    config: EmbeddingConfig,
}

impl EmbeddingClient {
    pub fn new(base_url: &str, api_key: &str, config: EmbeddingConfig) -> Result<Self> {
        let _parsed_url =
            reqwest::Url::parse(base_url).map_err(|e| anyhow!("Invalid URL: {}", e))?;
        if config.model.trim().is_empty() {
            return Err(anyhow!("Embedding model name cannot be empty"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            config,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl Embedder for EmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingsRequest {
            model: self.config.model.clone(),
            input: vec![text.to_string()],
            dimensions: self.config.dimensions,
        };

        let response = self
            .client
            .post(format!("{}/v1/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!("Embedding request failed ({}): {}", status, error_text));
        }

        let parsed: EmbeddingsResponse = response.json().await?;
        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| anyhow!("Embedding response contained no data"))?;

        debug!("Embedded {} chars into {} dims", text.len(), embedding.len());
        Ok(embedding)
    }
}
