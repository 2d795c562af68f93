//! Per-skill-gap hybrid matching: tag lookup fused with semantic search.

use crate::config::EngineConfig;
use crate::error::RecommendError;
use crate::explainer::why_this_course;
use crate::profile::SkillGapEntry;
use crate::similarity::{cosine_similarity, relevance_score};
use crate::types::{MatchType, RecommendedCourse, SkillGapCourseMatch};
use pathways_corpus::{CourseCatalog, CourseRecord};
use pathways_embedding::{EmbeddingClient, EmbeddingError};
use std::collections::HashMap;
use tracing::debug;

const EXACT_STRENGTH: f64 = 1.0;
const SUBSTRING_STRENGTH: f64 = 0.8;
const LOOSE_STRENGTH: f64 = 0.6;

/// Find 1-3 courses addressing one skill gap.
///
/// Two paths feed the result: a direct path over the skill-tag relation and
/// a semantic path over course embeddings. The union is fused by course id,
/// sorted by relevance, and truncated. An embedding failure empties the
/// semantic path; it never fails the match. An unmatched skill returns an
/// empty list, which is a valid outcome, not an error.
pub async fn match_courses_for_skill_gap<E, C>(
    embeddings: &E,
    catalog: &C,
    gap: &SkillGapEntry,
    corpus: &[CourseRecord],
    config: &EngineConfig,
) -> Result<Vec<SkillGapCourseMatch>, RecommendError>
where
    E: EmbeddingClient + ?Sized,
    C: CourseCatalog + ?Sized,
{
    let skill = gap.skill.trim();
    if skill.is_empty() {
        return Ok(Vec::new());
    }

    let direct = direct_matches(catalog, skill, corpus).await?;
    let semantic = semantic_matches(embeddings, skill, corpus, config).await;

    Ok(fuse(skill, direct, semantic, corpus, config))
}

/// A direct-path candidate before fusion.
struct DirectCandidate {
    strength: f64,
    reason: String,
}

/// Direct path: tag-relation lookup plus local either-direction matching.
async fn direct_matches<C: CourseCatalog + ?Sized>(
    catalog: &C,
    skill: &str,
    corpus: &[CourseRecord],
) -> Result<HashMap<String, DirectCandidate>, RecommendError> {
    let tag_rows = catalog.search_skill_tags(skill).await?;

    let needle = skill.to_lowercase();
    let mut candidate_ids: Vec<&str> = tag_rows.iter().map(|r| r.course_id.as_str()).collect();

    // The backend search only finds tags containing the skill; the other
    // direction (skill text containing a shorter tag) is matched locally.
    for record in corpus {
        let local_hit = record.skills.iter().any(|tag| {
            let tag = tag.to_lowercase();
            !tag.is_empty() && needle.contains(&tag)
        });
        if local_hit {
            candidate_ids.push(record.id.as_str());
        }
    }

    let mut matches = HashMap::new();
    for record in corpus {
        if !candidate_ids.contains(&record.id.as_str()) {
            continue;
        }

        let exact = record.skills.iter().any(|tag| tag.to_lowercase() == needle);
        let related = record.skills.iter().find(|tag| {
            let tag = tag.to_lowercase();
            tag.contains(&needle) || needle.contains(&tag)
        });

        let (strength, reason) = if exact {
            (EXACT_STRENGTH, format!("Directly teaches {skill}"))
        } else if let Some(tag) = related {
            (SUBSTRING_STRENGTH, format!("Covers {tag}, related to {skill}"))
        } else {
            (LOOSE_STRENGTH, "Tagged with related skills".to_string())
        };

        matches.insert(record.id.clone(), DirectCandidate { strength, reason });
    }

    Ok(matches)
}

/// Semantic path: embed a synthetic skill sentence and score the corpus.
///
/// Returns course id to raw similarity, thresholded and capped. An
/// embedding failure yields an empty map.
async fn semantic_matches<E: EmbeddingClient + ?Sized>(
    embeddings: &E,
    skill: &str,
    corpus: &[CourseRecord],
    config: &EngineConfig,
) -> HashMap<String, f64> {
    let sentence = format!(
        "Skill: {skill}. Looking for courses that teach {skill} skills and competencies."
    );

    let query = match embeddings.embed(&sentence).await {
        Ok(vector) => vector,
        Err(EmbeddingError::Unavailable(reason)) => {
            debug!(skill, %reason, "Embedding unavailable, skill-gap matching continues with direct path only");
            return HashMap::new();
        }
    };

    let mut scored: Vec<(&CourseRecord, f64)> = corpus
        .iter()
        .filter_map(|record| {
            let embedding = record.embedding.as_deref()?;
            let sim = cosine_similarity(&query, embedding);
            (sim >= config.skill_gap_min_similarity).then_some((record, sim))
        })
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(config.semantic_candidate_cap);

    scored
        .into_iter()
        .map(|(record, sim)| (record.id.clone(), sim))
        .collect()
}

/// Fuse the two paths, rank, truncate, and explain.
fn fuse(
    skill: &str,
    direct: HashMap<String, DirectCandidate>,
    semantic: HashMap<String, f64>,
    corpus: &[CourseRecord],
    config: &EngineConfig,
) -> Vec<SkillGapCourseMatch> {
    let by_id: HashMap<&str, &CourseRecord> =
        corpus.iter().map(|r| (r.id.as_str(), r)).collect();

    let mut fused: Vec<SkillGapCourseMatch> = Vec::new();

    for (course_id, candidate) in &direct {
        let Some(record) = by_id.get(course_id.as_str()).copied() else {
            continue;
        };

        let base_score = relevance_from_strength(candidate.strength);
        let mut reasons = vec![candidate.reason.clone()];
        let score = if semantic.contains_key(course_id) {
            reasons.push(format!("Strong semantic match for {skill}"));
            base_score.saturating_add(config.hybrid_boost).min(100)
        } else {
            base_score
        };
        reasons.truncate(config.max_match_reasons);

        fused.push(SkillGapCourseMatch {
            course: RecommendedCourse::from_record(
                record,
                score,
                reasons,
                vec![skill.to_string()],
            ),
            match_type: MatchType::Direct,
            match_strength: candidate.strength,
            why_this_course: why_this_course(skill, record),
            skill_gap_addressed: skill.to_string(),
        });
    }

    for (course_id, sim) in &semantic {
        if direct.contains_key(course_id) {
            continue;
        }
        let Some(record) = by_id.get(course_id.as_str()).copied() else {
            continue;
        };

        fused.push(SkillGapCourseMatch {
            course: RecommendedCourse::from_record(
                record,
                relevance_score(*sim),
                vec![format!("Semantically related to {skill}")],
                vec![skill.to_string()],
            ),
            match_type: MatchType::Semantic,
            match_strength: *sim,
            why_this_course: why_this_course(skill, record),
            skill_gap_addressed: skill.to_string(),
        });
    }

    fused.sort_by(|a, b| {
        b.course
            .relevance_score
            .cmp(&a.course.relevance_score)
            .then_with(|| {
                b.match_strength
                    .partial_cmp(&a.match_strength)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.course.course_id.cmp(&b.course.course_id))
    });
    fused.truncate(config.skill_gap_top_n);
    fused
}

/// Map a direct-path strength onto the 0-100 relevance scale.
fn relevance_from_strength(strength: f64) -> u8 {
    ((strength * 100.0).round() as u8).min(100)
}
