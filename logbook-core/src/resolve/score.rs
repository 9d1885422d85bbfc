//! Scoring of candidate directory names
//!
//! Pure functions over names only, so matching can be tested without a
//! filesystem.

use super::keywords::PathKeywords;

/// Base score for the depth fallback; each hyphen of difference costs one.
const DEPTH_BASE_SCORE: i64 = 1000;

/// One scored candidate from a single resolution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCandidate {
    /// Position of the candidate in the input list
    pub index: usize,
    pub score: i64,
}

/// Score one directory name, or `None` if it is disqualified.
///
/// With keyword tokens, every token must occur in the lowercased name and
/// the score is the summed token length. Without tokens (fully non-ASCII
/// paths) names are scored by how close their hyphen count is to the
/// expected path depth.
pub fn score_name(keywords: &PathKeywords, name: &str) -> Option<i64> {
    let lower = name.to_lowercase();
    if !keywords.accepts_prefix(&lower) {
        return None;
    }

    if keywords.tokens.is_empty() {
        let depth = lower.matches('-').count() as i64;
        let expected = keywords.expected_hyphens() as i64;
        return Some(DEPTH_BASE_SCORE - (depth - expected).abs());
    }

    let mut score = 0i64;
    for token in &keywords.tokens {
        if !lower.contains(token.as_str()) {
            return None;
        }
        score += token.len() as i64;
    }
    Some(score)
}

/// Pick the best-scoring name. Ties keep the earliest candidate.
pub fn best_match<S: AsRef<str>>(keywords: &PathKeywords, names: &[S]) -> Option<MatchCandidate> {
    let mut best: Option<MatchCandidate> = None;

    for (index, name) in names.iter().enumerate() {
        let name: &str = name.as_ref();
        let Some(score) = score_name(keywords, name) else {
            continue;
        };
        tracing::trace!(candidate = name, score, "scored log directory");

        if best.map_or(true, |b| score > b.score) {
            best = Some(MatchCandidate { index, score });
        }
    }

    best
}
