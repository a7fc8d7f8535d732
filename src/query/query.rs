//! Base query trait and common query functionality.

use std::fmt::Debug;

use serde_json::{Value, json};

/// Trait for composable query clauses.
///
/// A query can describe itself as a backend DSL fragment via
/// [`Query::to_json`], and can score a raw document directly via
/// [`Query::score`] — the latter powers the in-memory reference
/// executor and test fixtures.
pub trait Query: Send + Sync + Debug {
    /// Get the boost factor for this query.
    fn boost(&self) -> f32;

    /// Set the boost factor for this query.
    fn set_boost(&mut self, boost: f32);

    /// Get a human-readable description of this query.
    fn description(&self) -> String;

    /// Render this query as a backend DSL fragment.
    ///
    /// Two queries are structurally equivalent exactly when their JSON
    /// forms are equal.
    fn to_json(&self) -> Value;

    /// Score a document against this query.
    ///
    /// Returns `None` when the document does not match, otherwise the
    /// boosted relevance contribution.
    fn score(&self, doc: &Value) -> Option<f32>;

    /// Clone this query.
    fn clone_box(&self) -> Box<dyn Query>;
}

impl Clone for Box<dyn Query> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A query that matches every document.
///
/// The degenerate scored portion of a composition with no search text,
/// so that structural filters alone can drive the result set.
#[derive(Debug, Clone)]
pub struct MatchAllQuery {
    boost: f32,
}

impl MatchAllQuery {
    /// Create a new match-all query.
    pub fn new() -> Self {
        MatchAllQuery { boost: 1.0 }
    }
}

impl Default for MatchAllQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl Query for MatchAllQuery {
    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        "match_all".to_string()
    }

    fn to_json(&self) -> Value {
        json!({ "match_all": {} })
    }

    fn score(&self, _doc: &Value) -> Option<f32> {
        Some(self.boost)
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }
}

/// Collect the values at a dotted field path, flattening arrays.
///
/// `"assetAddress.postCode"` descends through objects; arrays along the
/// way contribute every element. Missing segments yield no values.
pub fn field_values<'a>(doc: &'a Value, path: &str) -> Vec<&'a Value> {
    let mut current = vec![doc];

    for segment in path.split('.') {
        let mut next = Vec::new();
        for value in current {
            match value {
                Value::Object(map) => {
                    if let Some(child) = map.get(segment) {
                        next.push(child);
                    }
                }
                Value::Array(items) => {
                    for item in items {
                        if let Some(child) = item.get(segment) {
                            next.push(child);
                        }
                    }
                }
                _ => {}
            }
        }
        current = next;
    }

    // Flatten terminal arrays so callers always see scalar leaves.
    let mut leaves = Vec::new();
    for value in current {
        match value {
            Value::Array(items) => leaves.extend(items.iter()),
            other => leaves.push(other),
        }
    }
    leaves
}

/// Render a leaf value as searchable text, if it has one.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_match_all_matches_anything() {
        let query = MatchAllQuery::new();
        assert_eq!(query.score(&json!({"id": 1})), Some(1.0));
        assert_eq!(query.score(&json!(null)), Some(1.0));
        assert_eq!(query.to_json(), json!({"match_all": {}}));
    }

    #[test]
    fn test_field_values_descends_objects() {
        let doc = json!({"assetAddress": {"postCode": "E8 1DY"}});
        let values = field_values(&doc, "assetAddress.postCode");
        assert_eq!(values, vec![&json!("E8 1DY")]);
    }

    #[test]
    fn test_field_values_flattens_arrays() {
        let doc = json!({
            "tenures": [
                {"paymentReference": "123"},
                {"paymentReference": "456"}
            ]
        });
        let values = field_values(&doc, "tenures.paymentReference");
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_field_values_missing_path() {
        let doc = json!({"firstname": "Alice"});
        assert!(field_values(&doc, "surname").is_empty());
        assert!(field_values(&doc, "tenures.uprn").is_empty());
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!("abc")), Some("abc".to_string()));
        assert_eq!(value_text(&json!(42)), Some("42".to_string()));
        assert_eq!(value_text(&json!(null)), None);
        assert_eq!(value_text(&json!({"a": 1})), None);
    }
}
