// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Startup configuration loaded from environment variables.
//!
//! The two provider API keys are mandatory; everything else has a default so
//! a node can come up with nothing but keys in its environment. Missing keys
//! fail the process at startup rather than surfacing later as opaque 401s.

use std::env;
use thiserror::Error;

/// Name of the pre-existing vector index this node binds to.
pub const DEFAULT_INDEX_NAME: &str = "medical-chatbot";

/// Number of documents retrieved per question.
pub const DEFAULT_TOP_K: usize = 3;

/// Chat-completion model used for answer synthesis.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o";

/// Embedding model used for query vectors.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Embedding width, kept at the width of the pre-existing index.
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;

pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com";
pub const DEFAULT_PINECONE_CONTROLLER_URL: &str = "https://api.pinecone.io";
pub const DEFAULT_API_PORT: u16 = 8080;

/// Errors raised while loading configuration at startup
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is absent or empty
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// An optional variable is present but cannot be parsed
    #[error("Invalid value for {var}: '{value}'")]
    InvalidVar { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub pinecone_api_key: String,
    pub openai_api_key: String,
    pub index_name: String,
    pub top_k: usize,
    pub chat_model: String,
    pub embedding_model: String,
    pub embedding_dimensions: usize,
    pub openai_api_base: String,
    pub pinecone_controller_url: String,
    pub api_port: u16,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError` if `PINECONE_API_KEY` or `OPENAI_API_KEY` is
    /// missing, or if a numeric variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        let top_k = match lookup("RAG_TOP_K") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|k| *k > 0)
                .ok_or(ConfigError::InvalidVar {
                    var: "RAG_TOP_K",
                    value: raw,
                })?,
            None => DEFAULT_TOP_K,
        };

        let embedding_dimensions = match lookup("EMBEDDING_DIMENSIONS") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|d| *d > 0)
                .ok_or(ConfigError::InvalidVar {
                    var: "EMBEDDING_DIMENSIONS",
                    value: raw,
                })?,
            None => DEFAULT_EMBEDDING_DIMENSIONS,
        };

        let api_port = match lookup("API_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidVar {
                var: "API_PORT",
                value: raw,
            })?,
            None => DEFAULT_API_PORT,
        };

        Ok(Self {
            pinecone_api_key: required("PINECONE_API_KEY")?,
            openai_api_key: required("OPENAI_API_KEY")?,
            index_name: lookup("PINECONE_INDEX").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
            top_k,
            chat_model: lookup("CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            embedding_model: lookup("EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            embedding_dimensions,
            openai_api_base: lookup("OPENAI_API_BASE")
                .unwrap_or_else(|| DEFAULT_OPENAI_API_BASE.to_string()),
            pinecone_controller_url: lookup("PINECONE_CONTROLLER_URL")
                .unwrap_or_else(|| DEFAULT_PINECONE_CONTROLLER_URL.to_string()),
            api_port,
        })
    }
}
