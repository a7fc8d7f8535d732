//! In-memory reference executor.
//!
//! Scores JSON documents directly through [`Query::score`], applies the
//! plan's sort and paging window, and reports the composed query DSL as
//! its diagnostics. Used as the test backend and as a reference for the
//! ranking semantics real executors should approximate.

use std::cmp::Ordering;
use std::collections::HashMap;

use log::debug;
use serde_json::Value;

use crate::error::{HearthError, Result};
use crate::query::{field_values, value_text};
use crate::search::executor::{SearchExecutor, SearchPlan, SearchResult};
use crate::search::sort::{SortOrder, SortSpec};

/// A [`SearchExecutor`] over in-memory JSON collections.
#[derive(Debug, Clone, Default)]
pub struct MemoryExecutor {
    collections: HashMap<String, Vec<Value>>,
}

impl MemoryExecutor {
    /// Create an executor with no collections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collection under an index name.
    pub fn with_collection<N, I>(mut self, name: N, documents: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = Value>,
    {
        self.collections
            .insert(name.into(), documents.into_iter().collect());
        self
    }

    /// Append documents to a collection, creating it if needed.
    pub fn add_documents<N, I>(&mut self, name: N, documents: I)
    where
        N: Into<String>,
        I: IntoIterator<Item = Value>,
    {
        self.collections
            .entry(name.into())
            .or_default()
            .extend(documents);
    }
}

fn compare_by_spec(a: &Value, b: &Value, spec: &SortSpec) -> Ordering {
    for sort_field in spec.fields() {
        let left = first_text(a, &sort_field.field);
        let right = first_text(b, &sort_field.field);

        let ordering = match (left, right) {
            (Some(l), Some(r)) => compare_values(&l, &r),
            // Documents missing the sort field go last either way.
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };

        let ordering = match sort_field.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn first_text(doc: &Value, field: &str) -> Option<String> {
    field_values(doc, field).iter().find_map(|v| value_text(v))
}

fn compare_values(left: &str, right: &str) -> Ordering {
    match (left.parse::<f64>(), right.parse::<f64>()) {
        (Ok(l), Ok(r)) => l.total_cmp(&r),
        _ => left.to_lowercase().cmp(&right.to_lowercase()),
    }
}

impl SearchExecutor for MemoryExecutor {
    fn execute(&self, plan: &SearchPlan) -> Result<SearchResult> {
        let mut matched: Vec<(f32, &Value)> = Vec::new();

        for index in &plan.indices {
            let collection = self.collections.get(index).ok_or_else(|| {
                HearthError::backend(format!("unknown index '{index}'"))
            })?;
            for doc in collection {
                if let Some(score) = plan.query.score(doc) {
                    matched.push((score, doc));
                }
            }
        }

        if plan.sort.is_relevance() {
            matched.sort_by(|(a, _), (b, _)| b.total_cmp(a));
        } else {
            matched.sort_by(|(_, a), (_, b)| compare_by_spec(a, b, &plan.sort));
        }

        let total = matched.len() as u64;
        let documents: Vec<Value> = matched
            .into_iter()
            .skip(plan.window.offset as usize)
            .take(plan.window.limit as usize)
            .map(|(_, doc)| doc.clone())
            .collect();

        let diagnostics = format!(
            "indices={:?} query={} sort={}",
            plan.indices,
            plan.query.to_json(),
            plan.sort.to_json()
        );
        debug!("memory search matched {total} documents: {diagnostics}");

        Ok(SearchResult {
            documents,
            total,
            diagnostics,
        })
    }
}
