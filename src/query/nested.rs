//! Nested query scoped to sub-document instances.

use serde_json::{Value, json};

use crate::query::query::{Query, field_values};

/// A query evaluated independently against each sub-document at a
/// path.
///
/// Matches are confined to fields within the same sub-document
/// instance: a query over a person's tenures must match address and
/// payment reference in the *same* tenure, never one field in tenure 1
/// and another in tenure 2.
#[derive(Debug, Clone)]
pub struct NestedQuery {
    path: String,
    inner: Box<dyn Query>,
    boost: f32,
}

impl NestedQuery {
    /// Create a new nested query.
    pub fn new<P: Into<String>>(path: P, inner: Box<dyn Query>) -> Self {
        NestedQuery {
            path: path.into(),
            inner,
            boost: 1.0,
        }
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Get the sub-document path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Re-root a sub-document under the nested path so the inner
    /// query's full field paths resolve against this instance alone.
    fn reroot(&self, sub_doc: &Value) -> Value {
        let mut wrapped = sub_doc.clone();
        for segment in self.path.rsplit('.') {
            wrapped = json!({ (segment): wrapped });
        }
        wrapped
    }
}

impl Query for NestedQuery {
    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        format!("nested({}: {})", self.path, self.inner.description())
    }

    fn to_json(&self) -> Value {
        let mut body = json!({
            "path": self.path,
            "query": self.inner.to_json(),
        });
        if self.boost != 1.0 {
            body["boost"] = json!(self.boost);
        }
        json!({ "nested": body })
    }

    fn score(&self, doc: &Value) -> Option<f32> {
        let best = field_values(doc, &self.path)
            .iter()
            .filter_map(|sub_doc| self.inner.score(&self.reroot(sub_doc)))
            .fold(None::<f32>, |acc, score| {
                Some(acc.map_or(score, |a| a.max(score)))
            })?;
        Some(best * self.boost)
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::multi_match::{MatchOperator, MultiMatchQuery, MultiMatchType};
    use serde_json::json;

    fn tenure_query(text: &str) -> NestedQuery {
        NestedQuery::new(
            "tenures",
            Box::new(
                MultiMatchQuery::new(
                    ["tenures.assetFullAddress", "tenures.paymentReference"],
                    text,
                )
                .match_type(MultiMatchType::BestFields)
                .operator(MatchOperator::And),
            ),
        )
    }

    #[test]
    fn test_matches_within_one_sub_document() {
        let doc = json!({
            "tenures": [
                {"assetFullAddress": "12 Mare Street", "paymentReference": "111"},
                {"assetFullAddress": "9 Dalston Lane", "paymentReference": "222"}
            ]
        });
        assert!(tenure_query("mare street").score(&doc).is_some());
        assert!(tenure_query("dalston lane").score(&doc).is_some());
    }

    #[test]
    fn test_does_not_match_across_sub_documents() {
        // "mare" is in tenure 1 and "lane" in tenure 2; no single
        // instance holds both.
        let doc = json!({
            "tenures": [
                {"assetFullAddress": "12 Mare Street"},
                {"assetFullAddress": "9 Dalston Lane"}
            ]
        });
        assert!(tenure_query("mare lane").score(&doc).is_none());
    }

    #[test]
    fn test_missing_path_matches_nothing() {
        let doc = json!({"firstname": "Alice"});
        assert!(tenure_query("mare street").score(&doc).is_none());
    }

    #[test]
    fn test_takes_best_instance_score() {
        let query = NestedQuery::new(
            "tenures",
            Box::new(
                MultiMatchQuery::new(["tenures.assetFullAddress"], "mare street")
                    .match_type(MultiMatchType::BestFields)
                    .operator(MatchOperator::Or),
            ),
        )
        .with_boost(2.0);

        let doc = json!({
            "tenures": [
                {"assetFullAddress": "Mare Road"},
                {"assetFullAddress": "Mare Street"}
            ]
        });
        // Two words matched in the best instance, times the boost.
        assert_eq!(query.score(&doc), Some(4.0));
    }
}
