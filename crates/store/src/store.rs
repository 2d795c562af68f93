//! Recommendation store service.

use crate::error::StoreError;
use crate::repo::RecommendationRepo;
use crate::types::{
    RecommendationStatus, RecommendationType, SavedFilter, StoredRecommendation,
};
use chrono::Utc;
use pathways_recommend::RecommendedCourse;
use tracing::debug;
use uuid::Uuid;

/// Lifecycle-aware persistence for ranked recommendations.
pub struct RecommendationStore<R> {
    repo: R,
}

impl<R: RecommendationRepo> RecommendationStore<R> {
    /// Wrap a repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Save a ranked recommendation set for a student.
    ///
    /// Upserts one row per course on the `(student, course, assessment)`
    /// triple. Saving an existing triple refreshes score, reasons and the
    /// saved-at timestamp. An existing non-`Active` status survives the
    /// re-save together with its dismissal metadata; `update_status` stays
    /// the only way to move a recommendation through its lifecycle.
    pub async fn save_recommendations(
        &self,
        student_id: &str,
        recommendations: &[RecommendedCourse],
        assessment_result_id: Option<&str>,
        recommendation_type: RecommendationType,
    ) -> Result<Vec<StoredRecommendation>, StoreError> {
        let mut stored = Vec::with_capacity(recommendations.len());

        for rec in recommendations {
            let existing = self
                .repo
                .find_by_triple(student_id, &rec.course_id, assessment_result_id)
                .await?;

            let row = match existing {
                Some(previous) => {
                    if previous.status != RecommendationStatus::Active {
                        debug!(
                            course_id = %rec.course_id,
                            status = %previous.status,
                            "Re-save keeps non-active recommendation status"
                        );
                    }
                    StoredRecommendation {
                        relevance_score: rec.relevance_score,
                        match_reasons: rec.match_reasons.clone(),
                        skill_gaps_addressed: rec.skill_gaps_addressed.clone(),
                        recommendation_type,
                        recommended_at: Utc::now(),
                        ..previous
                    }
                }
                None => StoredRecommendation {
                    id: Uuid::new_v4(),
                    student_id: student_id.to_string(),
                    course_id: rec.course_id.clone(),
                    assessment_result_id: assessment_result_id.map(str::to_string),
                    relevance_score: rec.relevance_score,
                    match_reasons: rec.match_reasons.clone(),
                    skill_gaps_addressed: rec.skill_gaps_addressed.clone(),
                    recommendation_type,
                    status: RecommendationStatus::Active,
                    recommended_at: Utc::now(),
                    dismissed_at: None,
                    dismissed_reason: None,
                },
            };

            stored.push(self.repo.upsert(row).await?);
        }

        Ok(stored)
    }

    /// Read a student's saved recommendations, best first.
    pub async fn saved_recommendations(
        &self,
        student_id: &str,
        filter: SavedFilter,
    ) -> Result<Vec<StoredRecommendation>, StoreError> {
        self.repo.find_for_student(student_id, &filter).await
    }

    /// Move a recommendation to a new lifecycle state.
    ///
    /// `status` arrives as the caller's string and must name one of the
    /// four states. Dismissing stamps `dismissed_at` and records the
    /// optional reason; other transitions clear neither field.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: &str,
        dismissed_reason: Option<String>,
    ) -> Result<StoredRecommendation, StoreError> {
        let status: RecommendationStatus = status.parse()?;

        let (dismissed_at, dismissed_reason) = if status == RecommendationStatus::Dismissed {
            (Some(Utc::now()), dismissed_reason)
        } else {
            (None, None)
        };

        self.repo
            .update_status(id, status, dismissed_at, dismissed_reason)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use pathways_corpus::SkillType;
    use std::sync::Mutex;

    /// Minimal in-memory repo mirroring the relational triple-upsert.
    #[derive(Default)]
    struct InMemoryRepo {
        rows: Mutex<Vec<StoredRecommendation>>,
        fail: bool,
    }

    impl InMemoryRepo {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn guard(&self) -> Result<(), StoreError> {
            if self.fail {
                Err(StoreError::Datastore("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl RecommendationRepo for InMemoryRepo {
        async fn find_by_triple(
            &self,
            student_id: &str,
            course_id: &str,
            assessment_result_id: Option<&str>,
        ) -> Result<Option<StoredRecommendation>, StoreError> {
            self.guard()?;
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|r| {
                    r.student_id == student_id
                        && r.course_id == course_id
                        && r.assessment_result_id.as_deref() == assessment_result_id
                })
                .cloned())
        }

        async fn upsert(
            &self,
            rec: StoredRecommendation,
        ) -> Result<StoredRecommendation, StoreError> {
            self.guard()?;
            let mut rows = self.rows.lock().unwrap();
            if let Some(existing) = rows.iter_mut().find(|r| {
                r.student_id == rec.student_id
                    && r.course_id == rec.course_id
                    && r.assessment_result_id == rec.assessment_result_id
            }) {
                *existing = rec.clone();
            } else {
                rows.push(rec.clone());
            }
            Ok(rec)
        }

        async fn find_for_student(
            &self,
            student_id: &str,
            filter: &SavedFilter,
        ) -> Result<Vec<StoredRecommendation>, StoreError> {
            self.guard()?;
            let mut rows: Vec<StoredRecommendation> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.student_id == student_id)
                .filter(|r| filter.status.map_or(true, |s| r.status == s))
                .filter(|r| {
                    filter
                        .assessment_result_id
                        .as_deref()
                        .map_or(true, |id| r.assessment_result_id.as_deref() == Some(id))
                })
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
            Ok(rows)
        }

        async fn update_status(
            &self,
            id: Uuid,
            status: RecommendationStatus,
            dismissed_at: Option<DateTime<Utc>>,
            dismissed_reason: Option<String>,
        ) -> Result<StoredRecommendation, StoreError> {
            self.guard()?;
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or(StoreError::NotFound(id))?;
            row.status = status;
            row.dismissed_at = dismissed_at;
            row.dismissed_reason = dismissed_reason;
            Ok(row.clone())
        }
    }

    fn recommendation(course_id: &str, score: u8) -> RecommendedCourse {
        RecommendedCourse {
            course_id: course_id.to_string(),
            title: format!("Course {course_id}"),
            code: format!("C-{course_id}"),
            description: String::new(),
            duration: "4 weeks".to_string(),
            category: "General".to_string(),
            skill_type: SkillType::Technical,
            relevance_score: score,
            match_reasons: vec!["Matches your career profile".to_string()],
            skill_gaps_addressed: vec![],
        }
    }

    #[tokio::test]
    async fn save_creates_active_rows() {
        let store = RecommendationStore::new(InMemoryRepo::default());
        let stored = store
            .save_recommendations(
                "student-1",
                &[recommendation("a", 80), recommendation("b", 70)],
                Some("assessment-1"),
                RecommendationType::Assessment,
            )
            .await
            .unwrap();

        assert_eq!(stored.len(), 2);
        assert!(stored
            .iter()
            .all(|r| r.status == RecommendationStatus::Active));
    }

    #[tokio::test]
    async fn resave_updates_instead_of_duplicating() {
        let store = RecommendationStore::new(InMemoryRepo::default());
        store
            .save_recommendations(
                "student-1",
                &[recommendation("a", 70)],
                None,
                RecommendationType::Assessment,
            )
            .await
            .unwrap();
        store
            .save_recommendations(
                "student-1",
                &[recommendation("a", 85)],
                None,
                RecommendationType::Assessment,
            )
            .await
            .unwrap();

        let rows = store
            .saved_recommendations("student-1", SavedFilter::default())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].relevance_score, 85);
    }

    #[tokio::test]
    async fn same_course_different_assessment_is_a_new_row() {
        let store = RecommendationStore::new(InMemoryRepo::default());
        for assessment in [Some("a1"), Some("a2"), None] {
            store
                .save_recommendations(
                    "student-1",
                    &[recommendation("a", 70)],
                    assessment,
                    RecommendationType::Assessment,
                )
                .await
                .unwrap();
        }

        let rows = store
            .saved_recommendations("student-1", SavedFilter::default())
            .await
            .unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[tokio::test]
    async fn resave_preserves_dismissed_status() {
        let store = RecommendationStore::new(InMemoryRepo::default());
        let stored = store
            .save_recommendations(
                "student-1",
                &[recommendation("a", 70)],
                None,
                RecommendationType::Assessment,
            )
            .await
            .unwrap();

        store
            .update_status(stored[0].id, "dismissed", Some("not interested".to_string()))
            .await
            .unwrap();

        let resaved = store
            .save_recommendations(
                "student-1",
                &[recommendation("a", 90)],
                None,
                RecommendationType::Assessment,
            )
            .await
            .unwrap();

        assert_eq!(resaved[0].status, RecommendationStatus::Dismissed);
        assert_eq!(resaved[0].relevance_score, 90);
        assert_eq!(
            resaved[0].dismissed_reason.as_deref(),
            Some("not interested")
        );
    }

    #[tokio::test]
    async fn dismissal_stamps_time_and_reason() {
        let store = RecommendationStore::new(InMemoryRepo::default());
        let stored = store
            .save_recommendations(
                "student-1",
                &[recommendation("a", 70)],
                None,
                RecommendationType::SkillGap,
            )
            .await
            .unwrap();

        let updated = store
            .update_status(stored[0].id, "dismissed", Some("too long".to_string()))
            .await
            .unwrap();

        assert_eq!(updated.status, RecommendationStatus::Dismissed);
        assert!(updated.dismissed_at.is_some());
        assert_eq!(updated.dismissed_reason.as_deref(), Some("too long"));
    }

    #[tokio::test]
    async fn enrollment_does_not_carry_dismissal_fields() {
        let store = RecommendationStore::new(InMemoryRepo::default());
        let stored = store
            .save_recommendations(
                "student-1",
                &[recommendation("a", 70)],
                None,
                RecommendationType::Assessment,
            )
            .await
            .unwrap();

        let updated = store
            .update_status(stored[0].id, "enrolled", Some("ignored".to_string()))
            .await
            .unwrap();

        assert_eq!(updated.status, RecommendationStatus::Enrolled);
        assert!(updated.dismissed_at.is_none());
        assert!(updated.dismissed_reason.is_none());
    }

    #[tokio::test]
    async fn unknown_status_string_is_rejected() {
        let store = RecommendationStore::new(InMemoryRepo::default());
        let err = store
            .update_status(Uuid::new_v4(), "archived", None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidStatus(_)));
    }

    #[tokio::test]
    async fn update_of_unknown_row_is_not_found() {
        let store = RecommendationStore::new(InMemoryRepo::default());
        let err = store
            .update_status(Uuid::new_v4(), "enrolled", None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn reads_filter_by_status_and_assessment() {
        let store = RecommendationStore::new(InMemoryRepo::default());
        let stored = store
            .save_recommendations(
                "student-1",
                &[recommendation("a", 60), recommendation("b", 90)],
                Some("a1"),
                RecommendationType::Assessment,
            )
            .await
            .unwrap();
        store
            .save_recommendations(
                "student-1",
                &[recommendation("c", 75)],
                Some("a2"),
                RecommendationType::Assessment,
            )
            .await
            .unwrap();
        store
            .update_status(stored[0].id, "enrolled", None)
            .await
            .unwrap();

        let enrolled = store
            .saved_recommendations(
                "student-1",
                SavedFilter {
                    status: Some(RecommendationStatus::Enrolled),
                    assessment_result_id: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(enrolled.len(), 1);
        assert_eq!(enrolled[0].course_id, "a");

        let from_a1 = store
            .saved_recommendations(
                "student-1",
                SavedFilter {
                    status: None,
                    assessment_result_id: Some("a1".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(from_a1.len(), 2);
        // Ordered best first.
        assert_eq!(from_a1[0].course_id, "b");
    }

    #[tokio::test]
    async fn datastore_failures_propagate() {
        let store = RecommendationStore::new(InMemoryRepo::failing());
        let err = store
            .save_recommendations(
                "student-1",
                &[recommendation("a", 70)],
                None,
                RecommendationType::Assessment,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Datastore(_)));

        let err = store
            .saved_recommendations("student-1", SavedFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Datastore(_)));
    }
}
