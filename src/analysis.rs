//! Wildcard tokenization for partial-word matching.

/// Split a search phrase into wildcard-decorated terms.
///
/// Every space-delimited word `w` becomes `*w*`, so that "Jon Sm"
/// matches "Jonathan Smith". An empty or whitespace-only phrase yields
/// no terms at all, never a match-everything term. The phrase is split
/// on single spaces without collapsing runs; callers are expected to
/// pre-normalize whitespace. No case folding happens here.
pub fn wildcard_terms(phrase: &str) -> Vec<String> {
    if phrase.trim().is_empty() {
        return Vec::new();
    }

    phrase.split(' ').map(|word| format!("*{word}*")).collect()
}
