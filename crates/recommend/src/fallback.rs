//! Keyword fallback used when profile embedding fails.

use crate::config::EngineConfig;
use crate::profile::AssessmentProfile;
use crate::types::RecommendedCourse;
use pathways_corpus::CourseRecord;

/// Reason attached to every fallback recommendation.
pub(crate) const FALLBACK_REASON: &str = "Matched by keywords";

/// Extract the flat keyword list used by the fallback matcher.
///
/// Keywords come from priority-A/B skill names plus career-cluster titles
/// and domains, widened by the injected taxonomy. Duplicates (by lowercase
/// form) are dropped while preserving first-seen order.
pub fn extract_profile_keywords(
    profile: &AssessmentProfile,
    config: &EngineConfig,
) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    let mut push = |term: &str| {
        let trimmed = term.trim();
        if trimmed.is_empty() {
            return;
        }
        let lower = trimmed.to_lowercase();
        if !seen.contains(&lower) {
            seen.push(lower);
            keywords.push(trimmed.to_string());
        }
    };

    for gap in profile.ordered_gap_names() {
        push(gap);
        for related in config.taxonomy.related_terms(gap) {
            push(related);
        }
    }

    for cluster in &profile.career_fit.clusters {
        push(&cluster.title);
        for domain in &cluster.domains {
            push(domain);
        }
    }

    keywords
}

/// Score courses by keyword coverage.
///
/// A course's match count is the number of keywords appearing as a
/// case-insensitive substring anywhere in its title, description, or skill
/// tags. Courses with no match are dropped; the rest are sorted by match
/// count descending and capped. Relevance is the matched fraction mapped
/// onto 0-100.
pub fn rank_by_keywords(
    keywords: &[String],
    courses: &[CourseRecord],
    profile: &AssessmentProfile,
    config: &EngineConfig,
) -> Vec<RecommendedCourse> {
    if keywords.is_empty() {
        return Vec::new();
    }

    let gap_names: Vec<String> = profile
        .ordered_gap_names()
        .into_iter()
        .map(str::to_lowercase)
        .collect();

    let mut scored: Vec<(&CourseRecord, usize, Vec<String>)> = courses
        .iter()
        .filter_map(|record| {
            let haystack = format!(
                "{} {} {}",
                record.title,
                record.description,
                record.skills.join(" ")
            )
            .to_lowercase();

            let matched: Vec<String> = keywords
                .iter()
                .filter(|k| haystack.contains(&k.to_lowercase()))
                .cloned()
                .collect();

            (!matched.is_empty()).then_some((record, matched.len(), matched))
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(config.fallback_fetch_limit);

    let total = keywords.len();
    scored
        .into_iter()
        .map(|(record, count, matched)| {
            let fraction = count as f64 / total as f64;
            let score = ((fraction * 100.0).round() as u8).min(100);
            let gaps = matched
                .into_iter()
                .filter(|k| gap_names.contains(&k.to_lowercase()))
                .collect();
            RecommendedCourse::from_record(
                record,
                score,
                vec![FALLBACK_REASON.to_string()],
                gaps,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SkillTaxonomy;
    use crate::profile::{CareerCluster, CareerFit, SkillGapEntry, SkillGapSummary};
    use pathways_corpus::SkillType;
    use std::collections::HashMap;

    fn record(id: &str, title: &str, description: &str, skills: &[&str]) -> CourseRecord {
        CourseRecord {
            id: id.into(),
            title: title.into(),
            code: format!("C-{id}"),
            description: description.into(),
            duration: "4 weeks".into(),
            category: "General".into(),
            skill_type: SkillType::Technical,
            target_outcomes: vec![],
            skills: skills.iter().map(|s| (*s).into()).collect(),
            embedding: None,
        }
    }

    fn profile() -> AssessmentProfile {
        AssessmentProfile {
            skill_gap: SkillGapSummary {
                priority_a: vec![SkillGapEntry::named("Python")],
                priority_b: vec![SkillGapEntry::named("SQL")],
                ..Default::default()
            },
            career_fit: CareerFit {
                clusters: vec![CareerCluster {
                    title: "Data Analyst".into(),
                    domains: vec!["analytics".into()],
                    entry_roles: vec!["Junior Analyst".into()],
                }],
            },
            ..Default::default()
        }
    }

    #[test]
    fn keywords_cover_gaps_titles_and_domains() {
        let keywords = extract_profile_keywords(&profile(), &EngineConfig::default());
        assert_eq!(
            keywords,
            vec!["Python", "SQL", "Data Analyst", "analytics"]
        );
    }

    #[test]
    fn taxonomy_widens_keywords() {
        let mut related = HashMap::new();
        related.insert("Python".to_string(), vec!["pandas".to_string()]);
        let config =
            EngineConfig::default().with_taxonomy(SkillTaxonomy::new(related));

        let keywords = extract_profile_keywords(&profile(), &config);
        assert!(keywords.contains(&"pandas".to_string()));
        // Related terms follow their skill, before later sections.
        let py = keywords.iter().position(|k| k == "Python").unwrap();
        let pd = keywords.iter().position(|k| k == "pandas").unwrap();
        assert!(pd == py + 1);
    }

    #[test]
    fn duplicate_keywords_collapse_case_insensitively() {
        let mut p = profile();
        p.career_fit.clusters[0].domains.push("python".into());
        let keywords = extract_profile_keywords(&p, &EngineConfig::default());
        let pythons = keywords
            .iter()
            .filter(|k| k.eq_ignore_ascii_case("python"))
            .count();
        assert_eq!(pythons, 1);
    }

    #[test]
    fn full_coverage_scores_one_hundred() {
        let keywords = vec!["Python".to_string()];
        let courses = vec![record("a", "Python for Data Analysts", "", &[])];
        let ranked = rank_by_keywords(&keywords, &courses, &profile(), &EngineConfig::default());
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].relevance_score, 100);
        assert_eq!(ranked[0].match_reasons, vec![FALLBACK_REASON.to_string()]);
    }

    #[test]
    fn partial_coverage_scores_fraction() {
        let keywords = vec![
            "Python".to_string(),
            "SQL".to_string(),
            "analytics".to_string(),
            "cloud".to_string(),
        ];
        let courses = vec![record("a", "Python and SQL", "", &[])];
        let ranked = rank_by_keywords(&keywords, &courses, &profile(), &EngineConfig::default());
        assert_eq!(ranked[0].relevance_score, 50);
        assert_eq!(ranked[0].skill_gaps_addressed, vec!["Python", "SQL"]);
    }

    #[test]
    fn unmatched_courses_dropped_and_sorted_by_count() {
        let keywords = vec!["Python".to_string(), "SQL".to_string()];
        let courses = vec![
            record("none", "Woodworking", "", &[]),
            record("one", "Python basics", "", &[]),
            record("two", "Python and SQL", "", &[]),
        ];
        let ranked = rank_by_keywords(&keywords, &courses, &profile(), &EngineConfig::default());
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].course_id, "two");
        assert_eq!(ranked[1].course_id, "one");
    }

    #[test]
    fn result_capped_at_limit() {
        let keywords = vec!["Python".to_string()];
        let courses: Vec<CourseRecord> = (0..15)
            .map(|i| record(&format!("c{i}"), "Python", "", &[]))
            .collect();
        let ranked = rank_by_keywords(&keywords, &courses, &profile(), &EngineConfig::default());
        assert_eq!(ranked.len(), 10);
    }

    #[test]
    fn tags_count_toward_matches() {
        let keywords = vec!["communication".to_string()];
        let courses = vec![record("soft", "Workplace Basics", "", &["Communication"])];
        let ranked = rank_by_keywords(&keywords, &courses, &profile(), &EngineConfig::default());
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn empty_keywords_produce_empty_result() {
        let courses = vec![record("a", "Python", "", &[])];
        assert!(rank_by_keywords(&[], &courses, &profile(), &EngineConfig::default()).is_empty());
    }
}
