//! Recommendation engine facade.

use crate::config::EngineConfig;
use crate::fallback::{extract_profile_keywords, rank_by_keywords};
use crate::profile::{build_profile_text, AssessmentProfile, SkillGapEntry};
use crate::ranker::rank_by_similarity;
use crate::skill_gap::match_courses_for_skill_gap;
use crate::types::{RecommendedCourse, SkillGapCourseMatch};
use pathways_corpus::{load_corpus, CourseCatalog, CourseRecord, SkillType};
use pathways_embedding::EmbeddingClient;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Whole-profile recommendations split by course skill type.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TypedRecommendations {
    /// Technical-skill courses.
    pub technical: Vec<RecommendedCourse>,
    /// Soft-skill courses.
    pub soft: Vec<RecommendedCourse>,
}

/// The semantic course recommendation engine.
///
/// Holds the embedding and catalog collaborators plus tuning config. Each
/// call operates on freshly fetched data; there is no cache and no shared
/// mutable state between invocations.
pub struct RecommendationEngine<E, C> {
    embeddings: Arc<E>,
    catalog: Arc<C>,
    config: EngineConfig,
}

impl<E, C> RecommendationEngine<E, C>
where
    E: EmbeddingClient,
    C: CourseCatalog,
{
    /// Create an engine with default tuning.
    pub fn new(embeddings: Arc<E>, catalog: Arc<C>) -> Self {
        Self {
            embeddings,
            catalog,
            config: EngineConfig::default(),
        }
    }

    /// Override the tuning configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Rank courses against the whole assessment profile.
    ///
    /// Never raises: an invalid profile or corpus failure yields an empty
    /// list, and an embedding failure degrades to keyword matching. An
    /// empty recommendation set is always an acceptable caller state.
    pub async fn recommended_courses(&self, profile: &AssessmentProfile) -> Vec<RecommendedCourse> {
        let text = match build_profile_text(profile) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Profile unsuitable for recommendations, returning none");
                return Vec::new();
            }
        };

        let query = match self.embeddings.embed(&text).await {
            Ok(query) => query,
            Err(e) => {
                warn!(error = %e, "Embedding failed, degrading to keyword fallback");
                return self.keyword_fallback(profile).await;
            }
        };

        let corpus = match load_corpus(self.catalog.as_ref()).await {
            Ok(corpus) => corpus,
            Err(e) => {
                warn!(error = %e, "Corpus fetch failed, returning no recommendations");
                return Vec::new();
            }
        };

        rank_by_similarity(&query, &corpus, profile, &self.config)
    }

    /// Rank courses per skill type, capped per type.
    ///
    /// The technical and soft rankings have no data dependency and are
    /// issued concurrently. Follows the same never-raise policy as
    /// [`Self::recommended_courses`].
    pub async fn recommended_courses_by_type(
        &self,
        profile: &AssessmentProfile,
        max_per_type: usize,
    ) -> TypedRecommendations {
        let text = match build_profile_text(profile) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Profile unsuitable for typed recommendations, returning none");
                return TypedRecommendations::default();
            }
        };

        match self.embeddings.embed(&text).await {
            Ok(query) => {
                let (technical, soft) = tokio::join!(
                    self.ranked_for_type(&query, profile, SkillType::Technical, max_per_type),
                    self.ranked_for_type(&query, profile, SkillType::Soft, max_per_type),
                );
                TypedRecommendations { technical, soft }
            }
            Err(e) => {
                warn!(error = %e, "Embedding failed, typed recommendations degrade to keyword fallback");
                let ranked = self.keyword_fallback(profile).await;
                partition_by_type(ranked, max_per_type)
            }
        }
    }

    /// Rank one skill-type subset of the corpus.
    async fn ranked_for_type(
        &self,
        query: &[f32],
        profile: &AssessmentProfile,
        skill_type: SkillType,
        max: usize,
    ) -> Vec<RecommendedCourse> {
        let corpus = match load_corpus(self.catalog.as_ref()).await {
            Ok(corpus) => corpus,
            Err(e) => {
                warn!(error = %e, ?skill_type, "Corpus fetch failed for typed ranking");
                return Vec::new();
            }
        };

        let subset: Vec<CourseRecord> = corpus
            .into_iter()
            .filter(|c| c.skill_type == skill_type)
            .collect();

        let config = self.config.clone().with_top_n(max);
        rank_by_similarity(query, &subset, profile, &config)
    }

    /// Match 1-3 courses to a single skill gap.
    ///
    /// Pass `corpus` to reuse an already-loaded corpus (the batch API does
    /// this); otherwise the corpus is fetched for the call. Never raises:
    /// failures are logged and yield an empty list for this gap.
    pub async fn courses_for_skill_gap(
        &self,
        gap: &SkillGapEntry,
        corpus: Option<&[CourseRecord]>,
    ) -> Vec<SkillGapCourseMatch> {
        let owned;
        let corpus = match corpus {
            Some(provided) => provided,
            None => match load_corpus(self.catalog.as_ref()).await {
                Ok(loaded) => {
                    owned = loaded;
                    &owned
                }
                Err(e) => {
                    warn!(skill = %gap.skill, error = %e, "Corpus fetch failed for skill-gap match");
                    return Vec::new();
                }
            },
        };

        match match_courses_for_skill_gap(
            self.embeddings.as_ref(),
            self.catalog.as_ref(),
            gap,
            corpus,
            &self.config,
        )
        .await
        {
            Ok(matches) => matches,
            Err(e) => {
                warn!(skill = %gap.skill, error = %e, "Skill-gap match failed, returning none for this gap");
                Vec::new()
            }
        }
    }

    /// Match courses for several skill gaps with one corpus fetch.
    ///
    /// Each gap is matched independently; a failure for one gap logs and
    /// maps to an empty entry while the rest continue.
    pub async fn courses_for_multiple_skill_gaps(
        &self,
        gaps: &[SkillGapEntry],
    ) -> HashMap<String, Vec<SkillGapCourseMatch>> {
        let corpus = match load_corpus(self.catalog.as_ref()).await {
            Ok(corpus) => corpus,
            Err(e) => {
                warn!(error = %e, "Corpus fetch failed for skill-gap batch");
                return gaps
                    .iter()
                    .map(|g| (g.skill.clone(), Vec::new()))
                    .collect();
            }
        };

        let mut results = HashMap::new();
        for gap in gaps {
            let matches = self.courses_for_skill_gap(gap, Some(&corpus)).await;
            results.insert(gap.skill.clone(), matches);
        }
        results
    }

    /// Keyword fallback for whole-profile ranking.
    async fn keyword_fallback(&self, profile: &AssessmentProfile) -> Vec<RecommendedCourse> {
        let keywords = extract_profile_keywords(profile, &self.config);
        if keywords.is_empty() {
            debug!("No fallback keywords in profile");
            return Vec::new();
        }

        let corpus = match load_corpus(self.catalog.as_ref()).await {
            Ok(corpus) => corpus,
            Err(e) => {
                warn!(error = %e, "Corpus fetch failed during keyword fallback");
                return Vec::new();
            }
        };
        let capped = &corpus[..corpus.len().min(self.config.fallback_fetch_limit)];

        debug!(keywords = keywords.len(), "Ranking by keyword fallback");
        rank_by_keywords(&keywords, capped, profile, &self.config)
    }
}

/// Split a ranked list into per-type buckets, each capped.
fn partition_by_type(ranked: Vec<RecommendedCourse>, max_per_type: usize) -> TypedRecommendations {
    let mut typed = TypedRecommendations::default();
    for course in ranked {
        let bucket = match course.skill_type {
            SkillType::Technical => &mut typed.technical,
            SkillType::Soft => &mut typed.soft,
        };
        if bucket.len() < max_per_type {
            bucket.push(course);
        }
    }
    typed
}
