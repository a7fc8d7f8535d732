//! The end-to-end search pipeline.

use log::debug;

use crate::compose::QueryComposer;
use crate::compose::profile::ProfileRegistry;
use crate::error::Result;
use crate::request::SearchRequest;
use crate::response::SearchResponse;
use crate::search::executor::{SearchExecutor, SearchPlan};
use crate::search::paging;
use crate::search::sort;

/// Drives one search request through composition, execution, and
/// response shaping.
///
/// Stateless between requests: the registry is immutable after
/// construction and composition holds no shared mutable state, so
/// concurrent searches execute fully independently.
pub struct SearchService<E: SearchExecutor> {
    registry: ProfileRegistry,
    executor: E,
}

impl<E: SearchExecutor> SearchService<E> {
    /// Create a service over a profile registry and an executor.
    pub fn new(registry: ProfileRegistry, executor: E) -> Self {
        SearchService { registry, executor }
    }

    /// The profile registry this service resolves against.
    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    /// Run one search request.
    ///
    /// Caller errors (bad paging, unknown filter) surface before
    /// anything reaches the backend; backend failures propagate intact
    /// with no partial results.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let profile = self.registry.profile(request.entity_type)?;
        let window = paging::window(request.page, request.page_size)?;

        let query = QueryComposer::new(profile).compose(request)?;
        let sort = sort::resolve_sort(profile, request.sort_by.as_deref(), request.descending);

        let plan = SearchPlan {
            indices: self.registry.indices(request.entity_type)?.to_vec(),
            query: Box::new(query),
            window,
            sort,
        };
        let result = self.executor.execute(&plan)?;

        debug!(
            "search '{}' on {} matched {} documents ({})",
            request.search_text, request.entity_type, result.total, result.diagnostics
        );
        Ok(SearchResponse::new(
            request.entity_type,
            result.documents,
            result.total,
        ))
    }
}
