//! Semantic course recommendations from assessment profiles.
//!
//! This crate provides:
//! - Profile text composition from assessment results
//! - Cosine-similarity ranking of the course corpus against a profile
//! - A per-skill-gap hybrid matcher fusing tag and semantic matches
//! - Keyword fallback when the embedding service is unavailable
//! - The [`RecommendationEngine`] facade tying the pieces together
//!
//! Whole-profile ranking never raises: every internal failure degrades to
//! an empty list or the keyword fallback, and the failure path is logged.

pub mod config;
pub mod engine;
pub mod error;
mod explainer;
pub mod fallback;
pub mod profile;
pub mod ranker;
pub mod similarity;
pub mod skill_gap;
pub mod types;

pub use config::{EngineConfig, SkillTaxonomy};
pub use engine::{RecommendationEngine, TypedRecommendations};
pub use error::RecommendError;
pub use fallback::{extract_profile_keywords, rank_by_keywords};
pub use profile::{
    build_profile_text, AptitudeProfile, AssessmentProfile, CareerCluster, CareerFit,
    Employability, RiasecProfile, SkillGapEntry, SkillGapSummary,
};
pub use ranker::rank_by_similarity;
pub use similarity::{cosine_similarity, relevance_score};
pub use skill_gap::match_courses_for_skill_gap;
pub use types::{MatchType, RecommendedCourse, SkillGapCourseMatch};
