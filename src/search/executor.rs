//! The search-backend boundary.

use serde_json::Value;

use crate::error::Result;
use crate::query::Query;
use crate::search::paging::PageWindow;
use crate::search::sort::SortSpec;

/// Everything an executor needs to run one composed search.
#[derive(Debug, Clone)]
pub struct SearchPlan {
    /// The physical collections to search.
    pub indices: Vec<String>,
    /// The composed boolean query tree.
    pub query: Box<dyn Query>,
    /// The paging window.
    pub window: PageWindow,
    /// The field ordering; empty means relevance.
    pub sort: SortSpec,
}

/// One complete result set from the backend.
///
/// Constructed once per request by the executor and consumed once by
/// the response mapper; never persisted.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The requested page of raw documents, in rank order.
    pub documents: Vec<Value>,
    /// Total documents matched across all pages.
    pub total: u64,
    /// Opaque backend diagnostics for debugging.
    pub diagnostics: String,
}

/// Executes a composed search against a backend.
///
/// Implementations own transport, timeout, and retry policy; the
/// composition engine never retries. A failure here reaches the caller
/// as a backend error with no partial results.
pub trait SearchExecutor: Send + Sync {
    /// Execute the plan and return one complete result set.
    fn execute(&self, plan: &SearchPlan) -> Result<SearchResult>;
}
