//! Relevance scoring: pure functions from (query, document text) to an
//! integer score.
//!
//! The model is a deliberate term-frequency heuristic, not an IR ranking
//! function: a token earns its length once for appearing anywhere in a
//! field, plus a flat bonus for every occurrence that starts at a word
//! boundary. The two scans use different matching semantics and are summed;
//! that double-count is intentional and load-bearing for the rank order.
//! Title matches count double.

use crate::types::Document;

/// Flat bonus per word-boundary occurrence of a token.
const BOUNDARY_BONUS: u32 = 2;

/// Multiplier applied to the title field score. Title relevance is worth
/// twice body relevance, which is what ranks title matches above
/// content-only matches.
const TITLE_WEIGHT: u32 = 2;

/// Split a query into lowercase search terms on runs of whitespace.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Score one field of text against the search terms.
///
/// `text` must already be lowercased. For each term: its character length
/// once if it appears anywhere as a substring, plus [`BOUNDARY_BONUS`] for
/// each occurrence starting at a word boundary.
pub fn field_score(text: &str, terms: &[String]) -> u32 {
    let mut score = 0;

    for term in terms {
        if text.contains(term.as_str()) {
            score += term.chars().count() as u32;
        }
        score += BOUNDARY_BONUS * boundary_matches(text, term);
    }

    score
}

/// Count occurrences of `term` whose first character is not preceded by an
/// alphanumeric character.
///
/// An explicit previous-character check rather than a pattern engine's `\b`,
/// so the behavior does not depend on any regex flavor. Occurrences are
/// scanned non-overlapping, left to right.
fn boundary_matches(text: &str, term: &str) -> u32 {
    if term.is_empty() {
        return 0;
    }

    let mut count = 0;
    for (pos, _) in text.match_indices(term) {
        let at_boundary = text[..pos]
            .chars()
            .next_back()
            .is_none_or(|prev| !prev.is_alphanumeric());
        if at_boundary {
            count += 1;
        }
    }
    count
}

/// Total relevance of a document: title and content fields scored
/// independently with the same algorithm, title weighted double.
pub fn score_document(document: &Document, terms: &[String]) -> u32 {
    let title_score = field_score(&document.title.to_lowercase(), terms);
    let content_score = field_score(&document.content.to_lowercase(), terms);
    TITLE_WEIGHT * title_score + content_score
}
