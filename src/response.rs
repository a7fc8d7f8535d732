//! Response shape returned to the calling layer.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::request::EntityType;

/// The typed search response: a total hit count plus the raw backend
/// documents keyed by the entity type that was searched.
///
/// Documents are passed through untransformed; only the envelope is
/// shaped here.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// Total number of documents matched, across all pages.
    pub total: u64,
    /// Exactly one entry: the request's entity-type key mapped to the
    /// documents of the requested page, in rank order.
    pub results: BTreeMap<String, Vec<Value>>,
}

impl SearchResponse {
    /// Shape a response for one entity type.
    pub fn new(entity_type: EntityType, documents: Vec<Value>, total: u64) -> Self {
        let mut results = BTreeMap::new();
        results.insert(entity_type.as_str().to_string(), documents);
        SearchResponse { total, results }
    }

    /// The documents for the searched entity type.
    pub fn documents(&self, entity_type: EntityType) -> &[Value] {
        self.results
            .get(entity_type.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
