use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::info;

use super::{RetrievedDocument, Retriever};

const API_KEY_HEADER: &str = "Api-Key";

/// Client bound to one pre-existing, externally managed Pinecone index.
///
/// The index is resolved by name through the control plane at startup; this
/// node never creates, populates, or deletes it. Queries go straight to the
/// index's data-plane host.
pub struct PineconeClient {
    client: Client,
    api_key: String,
    index_name: String,
    host: String,
}

impl PineconeClient {
    /// Bind to an existing index by name.
    ///
    /// Fails when the index does not exist or the control plane rejects the
    /// API key, so a misconfigured node dies at startup instead of on the
    /// first chat request.
    pub async fn connect(api_key: &str, index_name: &str, controller_url: &str) -> Result<Self> {
        let _parsed_url =
            reqwest::Url::parse(controller_url).map_err(|e| anyhow!("Invalid URL: {}", e))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        let url = format!(
            "{}/indexes/{}",
            controller_url.trim_end_matches('/'),
            index_name
        );
        let response = client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(anyhow!("Index '{}' not found", index_name));
        }
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!(
                "Failed to describe index '{}' ({}): {}",
                index_name,
                status,
                error_text
            ));
        }

        let description = response.json::<Value>().await?;
        let host = description["host"]
            .as_str()
            .ok_or_else(|| anyhow!("Index description for '{}' has no host", index_name))?
            .to_string();

        info!("Bound to vector index '{}' at {}", index_name, host);

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            index_name: index_name.to_string(),
            host,
        })
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    fn query_url(&self) -> String {
        // The control plane returns a bare hostname
        if self.host.starts_with("http://") || self.host.starts_with("https://") {
            format!("{}/query", self.host.trim_end_matches('/'))
        } else {
            format!("https://{}/query", self.host)
        }
    }

    fn parse_matches(result: &Value) -> Vec<RetrievedDocument> {
        result["matches"]
            .as_array()
            .map(|matches| {
                matches
                    .iter()
                    .map(|m| RetrievedDocument {
                        id: m["id"].as_str().unwrap_or_default().to_string(),
                        score: m["score"].as_f64().unwrap_or(0.0) as f32,
                        text: m["metadata"]["text"].as_str().unwrap_or_default().to_string(),
                        metadata: m["metadata"].clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl Retriever for PineconeClient {
    async fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<RetrievedDocument>> {
        let query = json!({
            "vector": vector,
            "topK": top_k,
            "includeMetadata": true,
        });

        let response = self
            .client
            .post(self.query_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!("Search failed ({}): {}", status, error_text));
        }

        let result = response.json::<Value>().await?;
        Ok(Self::parse_matches(&result))
    }
}
