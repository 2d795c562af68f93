//! Cosine similarity and the 0-100 relevance mapping.

/// Compute cosine similarity between two f32 vectors.
///
/// Returns 0.0 for zero-magnitude vectors or dimension mismatches.
/// Result clamped to [-1.0, 1.0].
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot: f64 = 0.0;
    let mut norm_a: f64 = 0.0;
    let mut norm_b: f64 = 0.0;

    for (&ai, &bi) in a.iter().zip(b) {
        let ai = f64::from(ai);
        let bi = f64::from(bi);
        dot += ai * bi;
        norm_a += ai * ai;
        norm_b += bi * bi;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }

    let result = dot / denom;
    if !result.is_finite() {
        return 0.0;
    }
    result.clamp(-1.0, 1.0)
}

/// Map raw cosine similarity to the user-facing relevance score.
///
/// Linear remap of [-1, 1] onto [0, 100]: similarity 1 scores 100,
/// 0 scores 50, -1 scores 0.
pub fn relevance_score(similarity: f64) -> u8 {
    let scaled = ((similarity + 1.0) / 2.0) * 100.0;
    scaled.round().clamp(0.0, 100.0) as u8
}
