//! Tolerant parsing of stored embedding text.

/// Parse a stored embedding string into a numeric vector.
///
/// Backends store embeddings in two delimited text forms: a JSON-array-like
/// string (`"[0.1, 0.2]"`) and a bare comma-separated list (`"0.1,0.2"`).
/// Both are accepted. Returns `None` on anything unparseable so a single
/// malformed row never aborts a corpus fetch.
pub fn parse_embedding(raw: &str) -> Option<Vec<f32>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(values) = serde_json::from_str::<Vec<f32>>(trimmed) {
        if values.is_empty() {
            return None;
        }
        return Some(values);
    }

    // Bare comma-separated numbers, with or without surrounding brackets.
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);

    let mut values = Vec::new();
    for part in inner.split(',') {
        let value: f32 = part.trim().parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        values.push(value);
    }

    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}
