//! Engine tuning configuration.
//!
//! Every threshold and cap the ranker and matcher use lives here rather
//! than as compiled-in constants, so deployments can tune per tenant and
//! tests can pin values deterministically.

use serde::Deserialize;
use std::collections::HashMap;

/// Injected skill taxonomy: skill name to related terms.
///
/// Loaded from configuration data at startup; used to widen keyword
/// extraction in the fallback matcher. Lookups are case-insensitive.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SkillTaxonomy {
    related: HashMap<String, Vec<String>>,
}

impl SkillTaxonomy {
    /// Build a taxonomy from a skill-to-related-terms mapping.
    pub fn new(related: HashMap<String, Vec<String>>) -> Self {
        Self { related }
    }

    /// Terms related to `skill`, if the taxonomy knows it.
    pub fn related_terms(&self, skill: &str) -> &[String] {
        let needle = skill.to_lowercase();
        self.related
            .iter()
            .find(|(k, _)| k.to_lowercase() == needle)
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the taxonomy carries any entries.
    pub fn is_empty(&self) -> bool {
        self.related.is_empty()
    }
}

/// Tuning knobs for ranking and matching.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum recommendations returned by whole-profile ranking.
    pub profile_top_n: usize,
    /// Minimum raw cosine similarity for whole-profile ranking.
    pub profile_min_similarity: f64,
    /// Minimum raw cosine similarity for the skill-gap semantic path.
    pub skill_gap_min_similarity: f64,
    /// Cap on semantic-path candidates per skill gap.
    pub semantic_candidate_cap: usize,
    /// Maximum courses returned per skill gap.
    pub skill_gap_top_n: usize,
    /// Relevance boost applied when direct and semantic paths agree.
    pub hybrid_boost: u8,
    /// Maximum match reasons attached to a recommendation.
    pub max_match_reasons: usize,
    /// Course fetch cap for the keyword fallback.
    pub fallback_fetch_limit: usize,
    /// Injected career/skill taxonomy.
    pub taxonomy: SkillTaxonomy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            profile_top_n: 10,
            profile_min_similarity: 0.3,
            skill_gap_min_similarity: 0.4,
            semantic_candidate_cap: 5,
            skill_gap_top_n: 3,
            hybrid_boost: 10,
            max_match_reasons: 3,
            fallback_fetch_limit: 10,
            taxonomy: SkillTaxonomy::default(),
        }
    }
}

impl EngineConfig {
    /// Override the whole-profile similarity threshold.
    pub fn with_min_similarity(mut self, threshold: f64) -> Self {
        self.profile_min_similarity = threshold;
        self
    }

    /// Override the whole-profile result cap.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.profile_top_n = top_n;
        self
    }

    /// Attach an injected taxonomy.
    pub fn with_taxonomy(mut self, taxonomy: SkillTaxonomy) -> Self {
        self.taxonomy = taxonomy;
        self
    }
}
