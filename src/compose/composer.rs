//! The query composer: one request in, one boolean query tree out.

use log::debug;

use crate::compose::ops;
use crate::compose::profile::{EntityProfile, Strategy};
use crate::error::{HearthError, Result};
use crate::query::{BooleanQuery, MatchAllQuery, Query};
use crate::request::SearchRequest;

/// Composes a [`SearchRequest`] into a scored boolean query for one
/// entity type.
///
/// Composition is pure and deterministic: the same request always
/// yields a structurally identical tree, and nothing is cached or
/// mutated between requests.
pub struct QueryComposer<'a> {
    profile: &'a EntityProfile,
}

impl<'a> QueryComposer<'a> {
    /// Create a composer over an entity profile.
    pub fn new(profile: &'a EntityProfile) -> Self {
        QueryComposer { profile }
    }

    /// Compose the query tree for a request.
    ///
    /// An empty or whitespace-only search phrase composes a match-all
    /// scored portion so that structural filters alone can drive the
    /// result set; it never composes a match-nothing query.
    pub fn compose(&self, request: &SearchRequest) -> Result<BooleanQuery> {
        if request.entity_type != self.profile.entity_type() {
            return Err(HearthError::configuration(format!(
                "composer for '{}' received a '{}' request",
                self.profile.entity_type(),
                request.entity_type
            )));
        }

        let mut tree = BooleanQuery::new();

        if request.has_search_text() {
            let search_text = request.search_text.trim();
            for strategy in self.profile.strategies() {
                if let Some(clause) = self.build(strategy, search_text, request.exact_match)? {
                    tree.add_should(clause);
                }
            }
            // A document must satisfy at least one scored clause to
            // appear at all.
            tree = tree.with_minimum_should_match(1);
        } else {
            tree.add_must(Box::new(MatchAllQuery::new()));
        }

        for (name, values) in &request.filters {
            let filter_fields = self.profile.filter_fields(name).ok_or_else(|| {
                HearthError::caller_input(format!(
                    "unknown filter '{}' for '{}'",
                    name,
                    self.profile.entity_type()
                ))
            })?;
            if let Some(filter) = ops::terms_filter(values, filter_fields.iter().cloned()) {
                tree.add_filter(filter);
            }
        }

        debug!(
            "composed {} query: {}",
            self.profile.entity_type(),
            tree.description()
        );
        Ok(tree)
    }

    fn build(
        &self,
        strategy: &Strategy,
        search_text: &str,
        exact_match: bool,
    ) -> Result<Option<Box<dyn Query>>> {
        let clause = match strategy {
            Strategy::Exact { fields, boost } => {
                Some(ops::exact_match(search_text, fields.iter().cloned(), *boost))
            }
            Strategy::Wildcard {
                fields,
                inexact_only_fields,
                boost,
            } => {
                let mut wildcard_fields = fields.clone();
                if !exact_match {
                    wildcard_fields.extend(inexact_only_fields.iter().cloned());
                }
                ops::wildcard_match(search_text, wildcard_fields, *boost)?
            }
            Strategy::BestFields {
                fields,
                fuzziness,
                boost,
            } => Some(ops::best_fields(
                search_text,
                fields.iter().cloned(),
                *fuzziness,
                *boost,
            )),
            Strategy::CrossFields { fields, boost } => Some(ops::cross_fields(
                search_text,
                fields.iter().cloned(),
                *boost,
            )),
            Strategy::MostFields {
                fields,
                fuzziness,
                boost,
            } => Some(ops::most_fields(
                search_text,
                fields.iter().cloned(),
                *fuzziness,
                *boost,
            )),
            Strategy::Nested {
                path,
                fields,
                match_type,
                operator,
                fuzziness,
                boost,
            } => Some(ops::nested_multi_match(
                search_text,
                path,
                fields.iter().cloned(),
                *match_type,
                *operator,
                *fuzziness,
                *boost,
            )),
        };
        Ok(clause)
    }
}
