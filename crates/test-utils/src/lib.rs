//! Shared test utilities for pathways crates.
//!
//! This crate provides the common fakes used across the workspace's test
//! suites: an in-memory course catalog and stub embedding clients.

use async_trait::async_trait;
use pathways_corpus::{CatalogError, CourseCatalog, CourseRow, CourseStatus, SkillTagRow, SkillType};
use pathways_embedding::{EmbeddingClient, EmbeddingError};
use std::collections::HashMap;

/// Build an active course row with sensible defaults.
pub fn course_row(id: &str, title: &str, embedding: Option<&str>) -> CourseRow {
    CourseRow {
        id: id.to_string(),
        title: title.to_string(),
        code: format!("C-{id}"),
        description: String::new(),
        duration: "4 weeks".to_string(),
        category: "General".to_string(),
        skill_type: SkillType::Technical,
        target_outcomes: Vec::new(),
        status: CourseStatus::Active,
        embedding: embedding.map(str::to_string),
    }
}

/// In-memory course catalog fake.
///
/// Build with [`InMemoryCatalog::default`] and the `with_*` helpers; set
/// `fail` to make every method return [`CatalogError::Fetch`].
#[derive(Default)]
pub struct InMemoryCatalog {
    courses: Vec<CourseRow>,
    tags: Vec<SkillTagRow>,
    fail: bool,
}

impl InMemoryCatalog {
    /// Add a course row.
    pub fn with_course(mut self, course: CourseRow) -> Self {
        self.courses.push(course);
        self
    }

    /// Add a skill tag for a course.
    pub fn with_tag(mut self, course_id: &str, tag: &str) -> Self {
        self.tags.push(SkillTagRow {
            course_id: course_id.to_string(),
            skill_tag: tag.to_string(),
        });
        self
    }

    /// Make every catalog call fail.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn guard(&self) -> Result<(), CatalogError> {
        if self.fail {
            Err(CatalogError::Fetch("catalog offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CourseCatalog for InMemoryCatalog {
    async fn fetch_courses(&self) -> Result<Vec<CourseRow>, CatalogError> {
        self.guard()?;
        Ok(self.courses.clone())
    }

    async fn fetch_skill_tags(&self) -> Result<Vec<SkillTagRow>, CatalogError> {
        self.guard()?;
        Ok(self.tags.clone())
    }

    async fn search_skill_tags(&self, fragment: &str) -> Result<Vec<SkillTagRow>, CatalogError> {
        self.guard()?;
        let needle = fragment.to_lowercase();
        Ok(self
            .tags
            .iter()
            .filter(|t| t.skill_tag.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

/// Embedding client fake returning canned vectors.
///
/// Texts are matched by substring so callers can key on a salient term
/// (e.g. a skill name) rather than the full composed query. The default
/// vector answers anything unmatched.
#[derive(Default)]
pub struct StaticEmbeddingClient {
    by_substring: HashMap<String, Vec<f32>>,
    default: Option<Vec<f32>>,
}

impl StaticEmbeddingClient {
    /// Return `vector` for any text containing `substring`.
    pub fn with_vector(mut self, substring: &str, vector: Vec<f32>) -> Self {
        self.by_substring.insert(substring.to_string(), vector);
        self
    }

    /// Vector returned when no substring matches.
    pub fn with_default(mut self, vector: Vec<f32>) -> Self {
        self.default = Some(vector);
        self
    }
}

#[async_trait]
impl EmbeddingClient for StaticEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        for (substring, vector) in &self.by_substring {
            if text.contains(substring.as_str()) {
                return Ok(vector.clone());
            }
        }
        self.default
            .clone()
            .ok_or_else(|| EmbeddingError::Unavailable("no canned vector for text".to_string()))
    }
}

/// Embedding client fake that always fails.
pub struct FailingEmbeddingClient;

#[async_trait]
impl EmbeddingClient for FailingEmbeddingClient {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::Unavailable("service down".to_string()))
    }
}
