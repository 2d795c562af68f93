//! Corpus assembly: join courses with skill tags and parse embeddings.

use crate::catalog::{CatalogError, CourseCatalog};
use crate::course::{CourseRecord, CourseStatus};
use crate::parse::parse_embedding;
use std::collections::HashMap;
use tracing::debug;

/// Load the eligible course corpus.
///
/// Fetches courses and the tag relation concurrently, keeps active courses
/// only, groups tags by course id, and parses stored embeddings. Courses
/// whose embedding text is missing or malformed are retained with
/// `embedding: None`.
pub async fn load_corpus<C: CourseCatalog + ?Sized>(
    catalog: &C,
) -> Result<Vec<CourseRecord>, CatalogError> {
    let (courses, tags) = tokio::join!(catalog.fetch_courses(), catalog.fetch_skill_tags());
    let (courses, tags) = (courses?, tags?);

    let mut tags_by_course: HashMap<String, Vec<String>> = HashMap::new();
    for tag in tags {
        tags_by_course
            .entry(tag.course_id)
            .or_default()
            .push(tag.skill_tag);
    }

    let corpus = courses
        .into_iter()
        .filter(|row| row.status == CourseStatus::Active)
        .map(|row| {
            let skills = tags_by_course.remove(&row.id).unwrap_or_default();
            let embedding = match row.embedding.as_deref() {
                Some(raw) => {
                    let parsed = parse_embedding(raw);
                    if parsed.is_none() {
                        debug!(course_id = %row.id, "Unparseable stored embedding, excluding course from vector scoring");
                    }
                    parsed
                }
                None => None,
            };
            CourseRecord::from_row(row, skills, embedding)
        })
        .collect();

    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{CourseRow, SkillTagRow, SkillType};
    use async_trait::async_trait;

    struct FixtureCatalog {
        courses: Vec<CourseRow>,
        tags: Vec<SkillTagRow>,
    }

    #[async_trait]
    impl CourseCatalog for FixtureCatalog {
        async fn fetch_courses(&self) -> Result<Vec<CourseRow>, CatalogError> {
            Ok(self.courses.clone())
        }

        async fn fetch_skill_tags(&self) -> Result<Vec<SkillTagRow>, CatalogError> {
            Ok(self.tags.clone())
        }

        async fn search_skill_tags(
            &self,
            fragment: &str,
        ) -> Result<Vec<SkillTagRow>, CatalogError> {
            let needle = fragment.to_lowercase();
            Ok(self
                .tags
                .iter()
                .filter(|t| t.skill_tag.to_lowercase().contains(&needle))
                .cloned()
                .collect())
        }
    }

    fn row(id: &str, status: CourseStatus, embedding: Option<&str>) -> CourseRow {
        CourseRow {
            id: id.into(),
            title: format!("Course {id}"),
            code: format!("C-{id}"),
            description: "desc".into(),
            duration: "4 weeks".into(),
            category: "General".into(),
            skill_type: SkillType::Technical,
            target_outcomes: vec![],
            status,
            embedding: embedding.map(Into::into),
        }
    }

    #[tokio::test]
    async fn joins_tags_and_filters_inactive() {
        let catalog = FixtureCatalog {
            courses: vec![
                row("a", CourseStatus::Active, Some("[1.0, 0.0]")),
                row("b", CourseStatus::Inactive, Some("[0.0, 1.0]")),
                row("c", CourseStatus::Archived, None),
            ],
            tags: vec![
                SkillTagRow {
                    course_id: "a".into(),
                    skill_tag: "SQL".into(),
                },
                SkillTagRow {
                    course_id: "a".into(),
                    skill_tag: "Data Modeling".into(),
                },
            ],
        };

        let corpus = load_corpus(&catalog).await.unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus[0].id, "a");
        assert_eq!(corpus[0].skills.len(), 2);
        assert_eq!(corpus[0].embedding, Some(vec![1.0, 0.0]));
    }

    #[tokio::test]
    async fn malformed_embedding_keeps_course_without_vector() {
        let catalog = FixtureCatalog {
            courses: vec![row("a", CourseStatus::Active, Some("broken"))],
            tags: vec![],
        };

        let corpus = load_corpus(&catalog).await.unwrap();
        assert_eq!(corpus.len(), 1);
        assert!(corpus[0].embedding.is_none());
    }

    #[tokio::test]
    async fn missing_embedding_keeps_course_without_vector() {
        let catalog = FixtureCatalog {
            courses: vec![row("a", CourseStatus::Active, None)],
            tags: vec![],
        };

        let corpus = load_corpus(&catalog).await.unwrap();
        assert_eq!(corpus.len(), 1);
        assert!(corpus[0].embedding.is_none());
    }
}
