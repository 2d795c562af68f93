//! Persisted recommendation types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle state of a stored recommendation.
///
/// Every new recommendation starts `Active`. The other states are reached
/// by one-way transitions; nothing transitions back to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationStatus {
    /// Shown to the student.
    Active,
    /// The student enrolled in the course.
    Enrolled,
    /// The student dismissed the recommendation.
    Dismissed,
    /// The student completed the course.
    Completed,
}

impl RecommendationStatus {
    /// All accepted states, for error messages.
    pub const ALL: [&'static str; 4] = ["active", "enrolled", "dismissed", "completed"];

    /// Lowercase wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Enrolled => "enrolled",
            Self::Dismissed => "dismissed",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for RecommendationStatus {
    type Err = crate::error::StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "enrolled" => Ok(Self::Enrolled),
            "dismissed" => Ok(Self::Dismissed),
            "completed" => Ok(Self::Completed),
            other => Err(crate::error::StoreError::InvalidStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for RecommendationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a recommendation was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    /// Whole-profile assessment ranking.
    Assessment,
    /// Per-skill-gap matching.
    SkillGap,
    /// Career-path guidance.
    CareerPath,
    /// Manually curated.
    Manual,
}

/// A persisted recommendation row.
///
/// At most one row exists per `(student_id, course_id,
/// assessment_result_id)` triple; re-saving the triple updates the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecommendation {
    /// Row id.
    pub id: Uuid,
    /// Student the recommendation belongs to.
    pub student_id: String,
    /// Recommended course.
    pub course_id: String,
    /// Assessment run that produced it, if any.
    pub assessment_result_id: Option<String>,
    /// Relevance score at save time (0-100).
    pub relevance_score: u8,
    /// Match reasons at save time.
    pub match_reasons: Vec<String>,
    /// Skill gaps the course addresses.
    pub skill_gaps_addressed: Vec<String>,
    /// How the recommendation was produced.
    pub recommendation_type: RecommendationType,
    /// Lifecycle state.
    pub status: RecommendationStatus,
    /// When the recommendation was (last) saved.
    pub recommended_at: DateTime<Utc>,
    /// When the student dismissed it, if they did.
    pub dismissed_at: Option<DateTime<Utc>>,
    /// Free-text dismissal reason, if given.
    pub dismissed_reason: Option<String>,
}

/// Filter for reading a student's saved recommendations.
#[derive(Debug, Clone, Default)]
pub struct SavedFilter {
    /// Keep only rows in this state.
    pub status: Option<RecommendationStatus>,
    /// Keep only rows from this assessment run.
    pub assessment_result_id: Option<String>,
}
