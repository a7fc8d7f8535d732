//! Multi-field match queries.
//!
//! One query covering the three multi-field relevance strategies:
//! best-fields (the single best-matching field wins), cross-fields
//! (a field set treated as one combined field) and most-fields
//! (scores summed across however many fields match).

use serde_json::{Value, json};

use crate::query::fuzzy::Fuzziness;
use crate::query::query::{Query, field_values, value_text};

/// How scores combine across the field set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiMatchType {
    /// Score the single best-matching field.
    BestFields,
    /// Treat the field set as one combined field.
    CrossFields,
    /// Sum scores across every matching field.
    MostFields,
}

impl MultiMatchType {
    fn key(&self) -> &'static str {
        match self {
            MultiMatchType::BestFields => "best_fields",
            MultiMatchType::CrossFields => "cross_fields",
            MultiMatchType::MostFields => "most_fields",
        }
    }
}

/// Whether all query words must be present, or any one suffices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOperator {
    And,
    Or,
}

impl MatchOperator {
    fn key(&self) -> &'static str {
        match self {
            MatchOperator::And => "and",
            MatchOperator::Or => "or",
        }
    }

    fn satisfied(&self, matched: usize, total: usize) -> bool {
        match self {
            MatchOperator::And => matched == total,
            MatchOperator::Or => matched > 0,
        }
    }
}

/// A full-text match over a set of fields.
#[derive(Debug, Clone)]
pub struct MultiMatchQuery {
    fields: Vec<String>,
    query: String,
    match_type: MultiMatchType,
    operator: MatchOperator,
    fuzziness: Option<Fuzziness>,
    boost: f32,
}

impl MultiMatchQuery {
    /// Create a new multi-match query.
    pub fn new<F, Q>(fields: F, query: Q) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        Q: Into<String>,
    {
        MultiMatchQuery {
            fields: fields.into_iter().map(Into::into).collect(),
            query: query.into(),
            match_type: MultiMatchType::BestFields,
            operator: MatchOperator::Or,
            fuzziness: None,
            boost: 1.0,
        }
    }

    /// Set the match type.
    pub fn match_type(mut self, match_type: MultiMatchType) -> Self {
        self.match_type = match_type;
        self
    }

    /// Set the word operator.
    pub fn operator(mut self, operator: MatchOperator) -> Self {
        self.operator = operator;
        self
    }

    /// Enable fuzzy word matching.
    pub fn fuzziness(mut self, fuzziness: Fuzziness) -> Self {
        self.fuzziness = Some(fuzziness);
        self
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Get the fields.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    fn query_words(&self) -> Vec<String> {
        tokenize(&self.query)
    }

    fn word_matches(&self, query_word: &str, token: &str) -> bool {
        if query_word == token {
            return true;
        }
        match self.fuzziness {
            Some(fuzziness) => fuzziness.matches(query_word, token),
            None => false,
        }
    }

    /// How many of the query words appear among the given tokens.
    fn matched_words(&self, words: &[String], tokens: &[String]) -> usize {
        words
            .iter()
            .filter(|word| tokens.iter().any(|token| self.word_matches(word, token)))
            .count()
    }

    fn field_tokens(&self, doc: &Value, field: &str) -> Vec<String> {
        field_values(doc, field)
            .iter()
            .filter_map(|v| value_text(v))
            .flat_map(|text| tokenize(&text))
            .collect()
    }
}

/// Lowercased word tokens, punctuation stripped from word edges.
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

impl Query for MultiMatchQuery {
    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        format!(
            "multi_match[{}]({}:{})",
            self.match_type.key(),
            self.fields.join("|"),
            self.query
        )
    }

    fn to_json(&self) -> Value {
        let mut body = json!({
            "query": self.query,
            "fields": self.fields,
            "type": self.match_type.key(),
            "operator": self.operator.key(),
        });
        if let Some(fuzziness) = self.fuzziness {
            body["fuzziness"] = json!(fuzziness.as_str());
        }
        if self.boost != 1.0 {
            body["boost"] = json!(self.boost);
        }
        json!({ "multi_match": body })
    }

    fn score(&self, doc: &Value) -> Option<f32> {
        let words = self.query_words();
        if words.is_empty() {
            return None;
        }

        let hits = match self.match_type {
            MultiMatchType::BestFields => self
                .fields
                .iter()
                .map(|field| self.matched_words(&words, &self.field_tokens(doc, field)))
                .filter(|&matched| self.operator.satisfied(matched, words.len()))
                .max()
                .unwrap_or(0),
            MultiMatchType::CrossFields => {
                let combined: Vec<String> = self
                    .fields
                    .iter()
                    .flat_map(|field| self.field_tokens(doc, field))
                    .collect();
                let matched = self.matched_words(&words, &combined);
                if self.operator.satisfied(matched, words.len()) {
                    matched
                } else {
                    0
                }
            }
            MultiMatchType::MostFields => self
                .fields
                .iter()
                .map(|field| self.matched_words(&words, &self.field_tokens(doc, field)))
                .filter(|&matched| self.operator.satisfied(matched, words.len()))
                .sum(),
        };

        if hits == 0 {
            return None;
        }
        Some(hits as f32 * self.boost)
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }
}
