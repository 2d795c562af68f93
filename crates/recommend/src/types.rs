//! Derived recommendation result types.

use pathways_corpus::{CourseRecord, SkillType};
use serde::{Deserialize, Serialize};

/// A ranked course recommendation.
///
/// Produced fresh on every ranking call and never mutated afterwards;
/// re-running the ranking replaces the whole set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedCourse {
    /// Recommended course id.
    pub course_id: String,
    /// Course title.
    pub title: String,
    /// Short course code.
    pub code: String,
    /// Free-text description.
    pub description: String,
    /// Human-readable duration.
    pub duration: String,
    /// Category label.
    pub category: String,
    /// Technical or soft skill course.
    pub skill_type: SkillType,
    /// User-facing relevance score (0-100).
    pub relevance_score: u8,
    /// Human-readable match reasons, at most three.
    pub match_reasons: Vec<String>,
    /// Skill-gap names this course addresses, priority order.
    pub skill_gaps_addressed: Vec<String>,
}

impl RecommendedCourse {
    /// Build a recommendation from a corpus record and scoring output.
    pub fn from_record(
        record: &CourseRecord,
        relevance_score: u8,
        match_reasons: Vec<String>,
        skill_gaps_addressed: Vec<String>,
    ) -> Self {
        Self {
            course_id: record.id.clone(),
            title: record.title.clone(),
            code: record.code.clone(),
            description: record.description.clone(),
            duration: record.duration.clone(),
            category: record.category.clone(),
            skill_type: record.skill_type,
            relevance_score,
            match_reasons,
            skill_gaps_addressed,
        }
    }
}

/// How a skill-gap match was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Matched via the skill-tag relation.
    Direct,
    /// Matched via embedding similarity only.
    Semantic,
}

/// A course matched to one specific skill gap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGapCourseMatch {
    /// The underlying recommendation.
    #[serde(flatten)]
    pub course: RecommendedCourse,
    /// Which path produced the match.
    pub match_type: MatchType,
    /// Raw match strength (0-1) before normalization.
    pub match_strength: f64,
    /// One explanatory sentence.
    pub why_this_course: String,
    /// The skill gap this match addresses.
    pub skill_gap_addressed: String,
}
