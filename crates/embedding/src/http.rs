//! HTTP client for the embedding service.

use crate::{EmbeddingClient, EmbeddingError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "http://localhost:8089";
const DEFAULT_MODEL: &str = "nomic-embed-text";

/// Get the embedding API base URL, allowing override for testing.
fn embedding_api_base() -> String {
    std::env::var("PATHWAYS_EMBEDDING_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

/// Embedding client backed by an HTTP embedding service.
#[derive(Debug, Clone)]
pub struct HttpEmbeddingClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl HttpEmbeddingClient {
    /// Create a client against the configured base URL and default model.
    pub fn new() -> Self {
        Self::with_base_url(embedding_api_base())
    }

    /// Create a client against an explicit base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the embedding model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl Default for HttpEmbeddingClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingClient for HttpEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let url = format!("{}/embeddings", self.base_url);
        debug!(model = %self.model, chars = text.len(), "Requesting embedding");

        let response = self
            .client
            .post(&url)
            .json(&EmbedRequest {
                model: &self.model,
                input: text,
            })
            .send()
            .await
            .map_err(|e| EmbeddingError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Unavailable(format!(
                "HTTP {status}: {body}"
            )));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::Unavailable(format!("malformed response: {e}")))?;

        if parsed.embedding.is_empty() {
            return Err(EmbeddingError::Unavailable(
                "service returned an empty vector".to_string(),
            ));
        }

        Ok(parsed.embedding)
    }
}
