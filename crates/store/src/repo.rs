//! Persistence collaborator interface.

use crate::error::StoreError;
use crate::types::{RecommendationStatus, SavedFilter, StoredRecommendation};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Row-level access to the recommendation table.
///
/// Implementations wrap the relational backend. The upsert key is the
/// `(student_id, course_id, assessment_result_id)` triple; the service
/// layer in [`crate::RecommendationStore`] owns lifecycle semantics.
#[async_trait]
pub trait RecommendationRepo: Send + Sync {
    /// Find the row for an exact triple.
    async fn find_by_triple(
        &self,
        student_id: &str,
        course_id: &str,
        assessment_result_id: Option<&str>,
    ) -> Result<Option<StoredRecommendation>, StoreError>;

    /// Insert or replace the row with `rec`'s triple.
    async fn upsert(&self, rec: StoredRecommendation) -> Result<StoredRecommendation, StoreError>;

    /// Rows for a student, filtered, ordered by relevance descending.
    async fn find_for_student(
        &self,
        student_id: &str,
        filter: &SavedFilter,
    ) -> Result<Vec<StoredRecommendation>, StoreError>;

    /// Update lifecycle fields of one row.
    async fn update_status(
        &self,
        id: Uuid,
        status: RecommendationStatus,
        dismissed_at: Option<DateTime<Utc>>,
        dismissed_reason: Option<String>,
    ) -> Result<StoredRecommendation, StoreError>;
}
