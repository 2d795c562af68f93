//! Error taxonomy for the recommendation core.

use pathways_corpus::CatalogError;
use pathways_embedding::EmbeddingError;

/// Failures raised by recommendation operations.
///
/// The whole-profile ranking surface swallows these internally (degrading
/// to fallback or an empty list); they are public so collaborator adapters
/// and the profile composer can propagate typed causes.
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    /// The profile carries neither skill gaps nor career clusters.
    #[error("assessment profile has neither skill gaps nor career clusters")]
    InsufficientProfileData,

    /// The embedding collaborator failed.
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    /// The course corpus could not be fetched.
    #[error(transparent)]
    Corpus(#[from] CatalogError),
}
