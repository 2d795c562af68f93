//! Catalog collaborator interface.

use crate::course::{CourseRow, SkillTagRow};
use async_trait::async_trait;

/// Errors surfaced by the catalog backend.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The backing datastore failed or rejected the query.
    #[error("course corpus fetch failed: {0}")]
    Fetch(String),
}

/// Read access to the course catalog and its skill-tag relation.
///
/// Implementations wrap the relational backend. All methods return rows as
/// stored; eligibility filtering (active status) and embedding parsing
/// happen in [`crate::load_corpus`].
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    /// Fetch all course rows.
    async fn fetch_courses(&self) -> Result<Vec<CourseRow>, CatalogError>;

    /// Fetch the full course/skill-tag relation.
    async fn fetch_skill_tags(&self) -> Result<Vec<SkillTagRow>, CatalogError>;

    /// Fetch tag rows whose text contains `fragment`, case-insensitive.
    async fn search_skill_tags(&self, fragment: &str) -> Result<Vec<SkillTagRow>, CatalogError>;
}
