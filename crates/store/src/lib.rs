//! Persisted recommendation lifecycle.
//!
//! Ranked recommendations are saved per student with a one-way status
//! lifecycle (`active` to `enrolled`, `dismissed` or `completed`). Unlike
//! the ranking surface, persistence operations raise on datastore failure:
//! a lost write must be visible to the caller.

pub mod error;
pub mod repo;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use repo::RecommendationRepo;
pub use store::RecommendationStore;
pub use types::{
    RecommendationStatus, RecommendationType, SavedFilter, StoredRecommendation,
};
