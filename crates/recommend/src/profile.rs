//! Assessment profile model and the weighted profile-text composer.

use crate::error::RecommendError;
use serde::{Deserialize, Serialize};

/// A student's assessment result, as produced by the assessment pipeline.
///
/// Owned by the assessment subsystem; the engine reads it and never
/// mutates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentProfile {
    /// Skill-gap analysis.
    pub skill_gap: SkillGapSummary,
    /// Career-cluster fit, ordered best-first.
    pub career_fit: CareerFit,
    /// Employability signals.
    pub employability: Employability,
    /// RIASEC interest typology, if assessed.
    pub riasec: Option<RiasecProfile>,
    /// Aptitude results, if assessed.
    pub aptitude: Option<AptitudeProfile>,
    /// Field of study (e.g. "Science", "Commerce").
    pub stream: Option<String>,
}

/// Ranked skill gaps plus surrounding context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillGapSummary {
    /// Most important gaps, ranked.
    pub priority_a: Vec<SkillGapEntry>,
    /// Secondary gaps, ranked.
    pub priority_b: Vec<SkillGapEntry>,
    /// Skills the student already demonstrates.
    pub current_strengths: Vec<String>,
    /// Suggested learning track.
    pub recommended_track: Option<String>,
}

/// A single named skill gap.
///
/// Proficiency levels are carried for future proficiency-aware matching;
/// matching currently keys on the skill name alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGapEntry {
    /// Skill name (e.g. "Python", "Public Speaking").
    pub skill: String,
    /// Assessed current proficiency.
    pub current_level: Option<u8>,
    /// Target proficiency.
    pub target_level: Option<u8>,
}

impl SkillGapEntry {
    /// Convenience constructor for a gap identified by name only.
    pub fn named(skill: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            current_level: None,
            target_level: None,
        }
    }
}

/// Career-cluster fit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CareerFit {
    /// Clusters ordered best-fit first.
    pub clusters: Vec<CareerCluster>,
}

/// One career cluster with its domains and entry-level roles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CareerCluster {
    /// Cluster title (e.g. "Data Analyst").
    pub title: String,
    /// Industry domains.
    pub domains: Vec<String>,
    /// Entry-level role titles.
    pub entry_roles: Vec<String>,
}

/// Employability signals from the assessment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Employability {
    /// Areas needing improvement.
    pub improvement_areas: Vec<String>,
    /// Existing strengths.
    pub strength_areas: Vec<String>,
}

/// RIASEC interest code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiasecProfile {
    /// Six-letter typology code (e.g. "RIA").
    pub code: String,
}

/// Aptitude assessment summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AptitudeProfile {
    /// Strongest aptitude areas.
    pub top_strengths: Vec<String>,
}

impl AssessmentProfile {
    /// Skill-gap names in priority order, A before B.
    pub fn ordered_gap_names(&self) -> Vec<&str> {
        self.skill_gap
            .priority_a
            .iter()
            .chain(self.skill_gap.priority_b.iter())
            .map(|g| g.skill.as_str())
            .collect()
    }

    fn has_required_content(&self) -> bool {
        !self.skill_gap.priority_a.is_empty()
            || !self.skill_gap.priority_b.is_empty()
            || !self.career_fit.clusters.is_empty()
    }
}

/// Compose the weighted natural-language description of a profile.
///
/// The section order encodes relative importance and must stay stable:
/// downstream embeddings are sensitive to term position. Each populated
/// section becomes one paragraph; absent fields are skipped silently.
///
/// Fails with [`RecommendError::InsufficientProfileData`] when the profile
/// has neither skill gaps nor career clusters.
pub fn build_profile_text(profile: &AssessmentProfile) -> Result<String, RecommendError> {
    if !profile.has_required_content() {
        return Err(RecommendError::InsufficientProfileData);
    }

    let mut sections = Vec::new();

    let priority_a = join_skills(&profile.skill_gap.priority_a);
    if !priority_a.is_empty() {
        sections.push(format!("Priority Skills to Develop: {priority_a}"));
    }

    let priority_b = join_skills(&profile.skill_gap.priority_b);
    if !priority_b.is_empty() {
        sections.push(format!("Secondary Skills to Develop: {priority_b}"));
    }

    if !profile.skill_gap.current_strengths.is_empty() {
        sections.push(format!(
            "Current Strengths: {}",
            profile.skill_gap.current_strengths.join(", ")
        ));
    }

    if let Some(track) = non_empty(profile.skill_gap.recommended_track.as_deref()) {
        sections.push(format!("Recommended Learning Track: {track}"));
    }

    if !profile.career_fit.clusters.is_empty() {
        let titles: Vec<&str> = profile
            .career_fit
            .clusters
            .iter()
            .take(3)
            .map(|c| c.title.as_str())
            .collect();
        sections.push(format!("Career Interests: {}", titles.join(", ")));

        let top = &profile.career_fit.clusters[0];
        if !top.domains.is_empty() {
            sections.push(format!("Career Domains: {}", top.domains.join(", ")));
        }
        if !top.entry_roles.is_empty() {
            sections.push(format!("Entry-Level Roles: {}", top.entry_roles.join(", ")));
        }
    }

    if !profile.employability.improvement_areas.is_empty() {
        sections.push(format!(
            "Employability Improvement Areas: {}",
            profile.employability.improvement_areas.join(", ")
        ));
    }

    if !profile.employability.strength_areas.is_empty() {
        sections.push(format!(
            "Employability Strengths: {}",
            profile.employability.strength_areas.join(", ")
        ));
    }

    if let Some(riasec) = &profile.riasec {
        if !riasec.code.is_empty() {
            sections.push(format!("Career Interest Type: {}", riasec.code));
        }
    }

    if let Some(aptitude) = &profile.aptitude {
        if !aptitude.top_strengths.is_empty() {
            sections.push(format!(
                "Aptitude Strengths: {}",
                aptitude.top_strengths.join(", ")
            ));
        }
    }

    if let Some(stream) = non_empty(profile.stream.as_deref()) {
        sections.push(format!("Field of Study: {stream}"));
    }

    Ok(sections.join("\n\n"))
}

fn join_skills(gaps: &[SkillGapEntry]) -> String {
    gaps.iter()
        .map(|g| g.skill.as_str())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
