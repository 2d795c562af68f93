//! Text-embedding collaborator interface for Pathways recommendations.
//!
//! The embedding service is an untrusted, possibly-failing dependency: any
//! transport or service error surfaces as [`EmbeddingError::Unavailable`]
//! and is never retried here. Callers decide whether a failure degrades to
//! a fallback path or to an empty result.

mod http;

pub use http::HttpEmbeddingClient;

use async_trait::async_trait;

/// Errors surfaced by the embedding collaborator.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    /// The service could not be reached or returned an unusable response.
    #[error("embedding service unavailable: {0}")]
    Unavailable(String),
}

/// Converts arbitrary text into a fixed-length numeric vector.
///
/// Implementations must return vectors of a deterministic length across
/// calls. A single failure is final; retry policy belongs to the caller.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Embed `text` into a numeric vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}
