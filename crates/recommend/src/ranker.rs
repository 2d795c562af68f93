//! Whole-profile similarity ranking.

use crate::config::EngineConfig;
use crate::profile::AssessmentProfile;
use crate::similarity::{cosine_similarity, relevance_score};
use crate::types::RecommendedCourse;
use pathways_corpus::CourseRecord;

/// Reason attached when no explicit overlap is found.
pub(crate) const GENERIC_REASON: &str = "Matches your career profile";

/// Rank the corpus against a profile query vector.
///
/// Scores every course that carries an embedding, drops raw similarity
/// below the configured threshold, sorts by raw similarity descending (the
/// rounded score loses ordering on near ties) and keeps the top N. Each
/// survivor gets up to three match reasons and the list of skill gaps it
/// addresses.
pub fn rank_by_similarity(
    query: &[f32],
    corpus: &[CourseRecord],
    profile: &AssessmentProfile,
    config: &EngineConfig,
) -> Vec<RecommendedCourse> {
    let mut scored: Vec<(&CourseRecord, f64)> = corpus
        .iter()
        .filter_map(|record| {
            let embedding = record.embedding.as_deref()?;
            let sim = cosine_similarity(query, embedding);
            (sim >= config.profile_min_similarity).then_some((record, sim))
        })
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(config.profile_top_n);

    scored
        .into_iter()
        .map(|(record, sim)| {
            RecommendedCourse::from_record(
                record,
                relevance_score(sim),
                match_reasons(profile, record, config.max_match_reasons),
                skill_gaps_addressed(profile, record),
            )
        })
        .collect()
}

/// Derive human-readable match reasons from profile/course lexical overlap.
pub(crate) fn match_reasons(
    profile: &AssessmentProfile,
    record: &CourseRecord,
    max_reasons: usize,
) -> Vec<String> {
    let mut reasons = Vec::new();

    for gap in profile.ordered_gap_names() {
        if reasons.len() >= max_reasons {
            break;
        }
        if course_mentions(record, gap) {
            reasons.push(format!("Develops {gap}, a priority skill for you"));
        }
    }

    if reasons.len() < max_reasons {
        if let Some(cluster) = profile.career_fit.clusters.first() {
            for domain in &cluster.domains {
                if reasons.len() >= max_reasons {
                    break;
                }
                if course_mentions(record, domain) {
                    reasons.push(format!("Relevant to the {domain} domain"));
                }
            }
        }
    }

    if reasons.is_empty() {
        reasons.push(GENERIC_REASON.to_string());
    }

    reasons
}

/// Skill-gap names (priority A before B) the course addresses.
///
/// A gap counts as addressed when its name and any course skill tag, the
/// description, or the title contain one another, case-insensitive.
pub(crate) fn skill_gaps_addressed(
    profile: &AssessmentProfile,
    record: &CourseRecord,
) -> Vec<String> {
    profile
        .ordered_gap_names()
        .into_iter()
        .filter(|gap| course_mentions(record, gap))
        .map(str::to_string)
        .collect()
}

/// Bidirectional case-insensitive substring test against a course's tags,
/// description, and title.
fn course_mentions(record: &CourseRecord, term: &str) -> bool {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return false;
    }

    let tag_hit = record.skills.iter().any(|tag| {
        let tag = tag.to_lowercase();
        tag.contains(&needle) || needle.contains(&tag)
    });
    if tag_hit {
        return true;
    }

    record.description.to_lowercase().contains(&needle)
        || record.title.to_lowercase().contains(&needle)
}
