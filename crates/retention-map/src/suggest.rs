//! Fuzzy header ranking for manual resolution.

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;
use retention_model::FieldKey;
use serde::Serialize;

use crate::rules::candidates;

/// Minimum similarity for a header to be offered.
pub const MIN_SUGGESTION_SCORE: f64 = 0.6;

/// A header ranked for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderSuggestion {
    pub header: String,
    /// Best Jaro-Winkler similarity against the field's candidates and key.
    pub score: f64,
}

/// Ranks `headers` by similarity to `key`'s candidate names.
///
/// Ties keep header order. Only headers scoring at least
/// [`MIN_SUGGESTION_SCORE`] are returned, at most `limit` of them.
pub fn suggest_headers(key: FieldKey, headers: &[String], limit: usize) -> Vec<HeaderSuggestion> {
    let mut names: Vec<String> = candidates(key).iter().map(|c| c.to_lowercase()).collect();
    names.push(key.as_str().to_lowercase());

    let mut ranked: Vec<HeaderSuggestion> = headers
        .iter()
        .map(|header| {
            let lowered = header.to_lowercase();
            let score = names
                .iter()
                .map(|name| jaro_similarity(lowered.chars(), name.chars()))
                .fold(0.0_f64, f64::max);
            HeaderSuggestion {
                header: header.clone(),
                score,
            }
        })
        .filter(|suggestion| suggestion.score >= MIN_SUGGESTION_SCORE)
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(limit);
    ranked
}
