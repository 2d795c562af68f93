//! Course and skill-tag data model.

use serde::{Deserialize, Serialize};

/// Whether a course develops technical or soft skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillType {
    /// Technical/hard-skill course.
    Technical,
    /// Soft-skill course.
    Soft,
}

/// Publication status of a course record.
///
/// Only [`CourseStatus::Active`] courses are eligible for recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    /// Published and enrollable.
    Active,
    /// Temporarily withdrawn.
    Inactive,
    /// Permanently retired.
    Archived,
}

/// Raw course row as returned by the catalog backend.
///
/// The embedding is carried as the backend's delimited text form; it is
/// parsed into a numeric vector when the corpus is assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRow {
    /// Backend identifier.
    pub id: String,
    /// Course title.
    pub title: String,
    /// Short course code (e.g. "CS-204").
    pub code: String,
    /// Free-text description.
    pub description: String,
    /// Human-readable duration (e.g. "6 weeks").
    pub duration: String,
    /// Category label.
    pub category: String,
    /// Technical or soft skill course.
    pub skill_type: SkillType,
    /// Learning outcomes the course targets.
    pub target_outcomes: Vec<String>,
    /// Publication status.
    pub status: CourseStatus,
    /// Stored embedding text, if the course has been embedded.
    pub embedding: Option<String>,
}

/// One row of the course/skill-tag relation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillTagRow {
    /// Course the tag belongs to.
    pub course_id: String,
    /// Tag text (e.g. "Python", "Public Speaking").
    pub skill_tag: String,
}

/// An assembled corpus entry: course fields plus joined skill tags and the
/// parsed embedding.
///
/// A record without an embedding stays in the corpus (its tags and metadata
/// are still used by the direct and fallback paths) but is skipped by
/// vector-similarity scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Backend identifier.
    pub id: String,
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
    /// Learning outcomes the course targets.
    pub target_outcomes: Vec<String>,
    /// Skill tags joined from the tag relation.
    pub skills: Vec<String>,
    /// Parsed embedding, if the stored text was parseable.
    pub embedding: Option<Vec<f32>>,
}

impl CourseRecord {
    /// Assemble a record from a raw row, its tags, and a parsed embedding.
    pub fn from_row(row: CourseRow, skills: Vec<String>, embedding: Option<Vec<f32>>) -> Self {
        Self {
            id: row.id,
            title: row.title,
            code: row.code,
            description: row.description,
            duration: row.duration,
            category: row.category,
            skill_type: row.skill_type,
            target_outcomes: row.target_outcomes,
            skills,
            embedding,
        }
    }
}
