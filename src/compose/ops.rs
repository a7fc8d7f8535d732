//! The scoring strategy library.
//!
//! Each function builds one independent, boosted query fragment
//! encoding a single matching strategy. Fragments are created fresh per
//! request — the search text is embedded in them — and OR-combined by
//! the composer.

use std::collections::BTreeSet;

use crate::analysis::wildcard_terms;
use crate::error::Result;
use crate::query::{
    BooleanQuery, Fuzziness, MatchOperator, MultiMatchQuery, MultiMatchType, NestedQuery, Query,
    TermQuery, TermsQuery, WildcardQuery,
};

/// Verbatim term equality over one or more fields.
///
/// The highest-precedence strategy: an exact postcode or reference-code
/// hit must outrank any fuzzy or wildcard hit.
pub fn exact_match<F>(search_text: &str, fields: F, boost: f32) -> Box<dyn Query>
where
    F: IntoIterator,
    F::Item: Into<String>,
{
    let mut terms: Vec<Box<dyn Query>> = fields
        .into_iter()
        .map(|field| {
            Box::new(TermQuery::new(field.into(), search_text.to_string()).with_boost(boost))
                as Box<dyn Query>
        })
        .collect();

    if terms.len() == 1 {
        return terms.pop().unwrap();
    }

    let mut combined = BooleanQuery::new();
    for term in terms {
        combined.add_should(term);
    }
    Box::new(combined.with_minimum_should_match(1))
}

/// Wildcard-equality clauses for every field and every `*word*` term,
/// OR-combined. Returns `None` when the phrase tokenizes to nothing.
pub fn wildcard_match<F>(
    search_text: &str,
    fields: F,
    boost: f32,
) -> Result<Option<Box<dyn Query>>>
where
    F: IntoIterator,
    F::Item: Into<String>,
{
    let terms = wildcard_terms(search_text);
    if terms.is_empty() {
        return Ok(None);
    }

    let mut combined = BooleanQuery::new();
    for field in fields {
        let field = field.into();
        for term in &terms {
            combined.add_should(Box::new(
                WildcardQuery::new(field.clone(), term.clone())?.with_boost(boost),
            ));
        }
    }
    Ok(Some(Box::new(combined.with_minimum_should_match(1))))
}

/// Score the single best-matching field; every query word must be
/// present in it.
pub fn best_fields<F>(
    search_text: &str,
    fields: F,
    fuzziness: Option<Fuzziness>,
    boost: f32,
) -> Box<dyn Query>
where
    F: IntoIterator,
    F::Item: Into<String>,
{
    let mut query = MultiMatchQuery::new(fields, search_text)
        .match_type(MultiMatchType::BestFields)
        .operator(MatchOperator::And)
        .with_boost(boost);
    if let Some(fuzziness) = fuzziness {
        query = query.fuzziness(fuzziness);
    }
    Box::new(query)
}

/// Treat the field set as one combined field; any query word may appear
/// anywhere in it.
pub fn cross_fields<F>(search_text: &str, fields: F, boost: f32) -> Box<dyn Query>
where
    F: IntoIterator,
    F::Item: Into<String>,
{
    Box::new(
        MultiMatchQuery::new(fields, search_text)
            .match_type(MultiMatchType::CrossFields)
            .operator(MatchOperator::Or)
            .with_boost(boost),
    )
}

/// Sum scores across however many fields match.
pub fn most_fields<F>(
    search_text: &str,
    fields: F,
    fuzziness: Option<Fuzziness>,
    boost: f32,
) -> Box<dyn Query>
where
    F: IntoIterator,
    F::Item: Into<String>,
{
    let mut query = MultiMatchQuery::new(fields, search_text)
        .match_type(MultiMatchType::MostFields)
        .operator(MatchOperator::Or)
        .with_boost(boost);
    if let Some(fuzziness) = fuzziness {
        query = query.fuzziness(fuzziness);
    }
    Box::new(query)
}

/// A multi-match confined to one sub-document instance at `path`.
pub fn nested_multi_match<F>(
    search_text: &str,
    path: &str,
    fields: F,
    match_type: MultiMatchType,
    operator: MatchOperator,
    fuzziness: Option<Fuzziness>,
    boost: f32,
) -> Box<dyn Query>
where
    F: IntoIterator,
    F::Item: Into<String>,
{
    let mut inner = MultiMatchQuery::new(fields, search_text)
        .match_type(match_type)
        .operator(operator);
    if let Some(fuzziness) = fuzziness {
        inner = inner.fuzziness(fuzziness);
    }
    Box::new(NestedQuery::new(path, Box::new(inner)).with_boost(boost))
}

/// A non-scoring categorical constraint: the document must hold one of
/// `values` on any of `fields`. `None` when the value set is empty.
pub fn terms_filter<F>(values: &BTreeSet<String>, fields: F) -> Option<Box<dyn Query>>
where
    F: IntoIterator,
    F::Item: Into<String>,
{
    if values.is_empty() {
        return None;
    }
    Some(Box::new(TermsQuery::new(fields, values.iter().cloned())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exact_match_single_field_is_a_plain_term() {
        let query = exact_match("E8 1DY", ["assetAddress.postCode"], 10.0);
        assert_eq!(
            query.to_json(),
            json!({"term": {"assetAddress.postCode": {"value": "E8 1DY", "boost": 10.0}}})
        );
    }

    #[test]
    fn test_exact_match_multi_field_needs_one_hit() {
        let query = exact_match("E8 1DY", ["assetAddress.postCode", "assetAddress.uprn"], 10.0);
        assert!(
            query
                .score(&json!({"assetAddress": {"postCode": "E8 1DY"}}))
                .is_some()
        );
        assert!(
            query
                .score(&json!({"assetAddress": {"postCode": "N1 6PQ"}}))
                .is_none()
        );
    }

    #[test]
    fn test_wildcard_match_emits_field_times_term_clauses() {
        let query = wildcard_match("Jon Sm", ["firstname", "surname"], 1.0)
            .unwrap()
            .unwrap();
        let rendered = query.to_json();
        assert_eq!(rendered["bool"]["should"].as_array().unwrap().len(), 4);

        let doc = json!({"firstname": "Jonathan", "surname": "Smith"});
        assert!(query.score(&doc).is_some());
    }

    #[test]
    fn test_wildcard_match_empty_phrase_is_none() {
        assert!(wildcard_match("", ["firstname"], 1.0).unwrap().is_none());
        assert!(wildcard_match("  ", ["firstname"], 1.0).unwrap().is_none());
    }

    #[test]
    fn test_terms_filter_empty_values_is_none() {
        let values = BTreeSet::new();
        assert!(terms_filter(&values, ["assetType"]).is_none());

        let values: BTreeSet<String> = ["Dwelling".to_string()].into();
        assert!(terms_filter(&values, ["assetType"]).is_some());
    }

    #[test]
    fn test_strategy_fragments_are_independent() {
        // Two builds of the same strategy are structurally identical
        // but distinct objects.
        let a = cross_fields("jon smith", ["firstname", "surname"], 6.0);
        let b = cross_fields("jon smith", ["firstname", "surname"], 6.0);
        assert_eq!(a.to_json(), b.to_json());
    }
}
