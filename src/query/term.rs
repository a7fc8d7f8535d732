//! Term queries for verbatim value matching.

use std::collections::BTreeSet;

use serde_json::{Value, json};

use crate::query::query::{Query, field_values, value_text};

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// A query that matches documents whose field holds a specific value.
///
/// Term equality, not full-text: the value is compared verbatim against
/// the stored field (case-insensitively, matching the backend's keyword
/// normalizer), with no tokenization and no fuzziness. Used for
/// identifiers, reference codes and postcodes.
#[derive(Debug, Clone)]
pub struct TermQuery {
    field: String,
    value: String,
    boost: f32,
}

impl TermQuery {
    /// Create a new term query.
    pub fn new<F, V>(field: F, value: V) -> Self
    where
        F: Into<String>,
        V: Into<String>,
    {
        TermQuery {
            field: field.into(),
            value: value.into(),
            boost: 1.0,
        }
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Query for TermQuery {
    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        format!("term({}:{})", self.field, self.value)
    }

    fn to_json(&self) -> Value {
        let mut body = json!({ "value": self.value });
        if self.boost != 1.0 {
            body["boost"] = json!(self.boost);
        }
        json!({ "term": { (self.field.as_str()): body } })
    }

    fn score(&self, doc: &Value) -> Option<f32> {
        let matched = field_values(doc, &self.field)
            .iter()
            .filter_map(|v| value_text(v))
            .any(|text| eq_ignore_case(&text, &self.value));
        matched.then_some(self.boost)
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }
}

/// A non-scoring filter: the document must hold one of a set of values
/// on at least one of a set of fields.
///
/// Built by the filter-clause builder for categorical constraints that
/// narrow the result set without influencing ranking; always attached
/// under the boolean query's filter leg.
#[derive(Debug, Clone)]
pub struct TermsQuery {
    fields: Vec<String>,
    values: BTreeSet<String>,
    boost: f32,
}

impl TermsQuery {
    /// Create a new terms query.
    pub fn new<F, V>(fields: F, values: V) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        TermsQuery {
            fields: fields.into_iter().map(Into::into).collect(),
            values: values.into_iter().map(Into::into).collect(),
            boost: 1.0,
        }
    }

    /// Get the fields.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Get the allowed values.
    pub fn values(&self) -> &BTreeSet<String> {
        &self.values
    }
}

impl Query for TermsQuery {
    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        format!(
            "terms({}:{})",
            self.fields.join("|"),
            self.values.iter().cloned().collect::<Vec<_>>().join(",")
        )
    }

    fn to_json(&self) -> Value {
        let values: Vec<&String> = self.values.iter().collect();
        let per_field: Vec<Value> = self
            .fields
            .iter()
            .map(|field| json!({ "terms": { (field.as_str()): values } }))
            .collect();
        if per_field.len() == 1 {
            per_field.into_iter().next().unwrap()
        } else {
            json!({ "bool": { "should": per_field, "minimum_should_match": 1 } })
        }
    }

    fn score(&self, doc: &Value) -> Option<f32> {
        let matched = self.fields.iter().any(|field| {
            field_values(doc, field)
                .iter()
                .filter_map(|v| value_text(v))
                .any(|text| self.values.iter().any(|allowed| eq_ignore_case(allowed, &text)))
        });
        matched.then_some(self.boost)
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_term_query_verbatim_match() {
        let query = TermQuery::new("assetAddress.postCode", "E8 1DY").with_boost(10.0);
        assert_eq!(
            query.score(&json!({"assetAddress": {"postCode": "E8 1DY"}})),
            Some(10.0)
        );
        assert!(query.score(&json!({"assetAddress": {"postCode": "E8"}})).is_none());
    }

    #[test]
    fn test_term_query_is_not_substring_match() {
        let query = TermQuery::new("surname", "Smith");
        assert!(query.score(&json!({"surname": "Smithson"})).is_none());
    }

    #[test]
    fn test_term_query_case_insensitive() {
        let query = TermQuery::new("surname", "smith");
        assert!(query.score(&json!({"surname": "Smith"})).is_some());
    }

    #[test]
    fn test_term_query_numeric_field() {
        let query = TermQuery::new("assetAddress.uprn", "100023456789");
        assert!(
            query
                .score(&json!({"assetAddress": {"uprn": 100023456789u64}}))
                .is_some()
        );
    }

    #[test]
    fn test_terms_query_any_field_any_value() {
        let query = TermsQuery::new(["assetType"], ["Dwelling", "Block"]);
        assert!(query.score(&json!({"assetType": "Block"})).is_some());
        assert!(query.score(&json!({"assetType": "Garage"})).is_none());
    }

    #[test]
    fn test_terms_query_json_single_field() {
        let query = TermsQuery::new(["assetType"], ["Dwelling"]);
        assert_eq!(query.to_json(), json!({"terms": {"assetType": ["Dwelling"]}}));
    }
}
