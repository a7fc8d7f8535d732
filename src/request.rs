//! Search request model and entity types.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HearthError, Result};

/// Default page size when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: i64 = 12;

/// The document collections a search can target.
///
/// Fully enumerated at compile time; every variant must have an entry
/// in the profile registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityType {
    #[serde(rename = "persons")]
    Person,
    #[serde(rename = "assets")]
    Asset,
    #[serde(rename = "tenures")]
    Tenure,
    #[serde(rename = "accounts")]
    Account,
    #[serde(rename = "transactions")]
    Transaction,
    #[serde(rename = "staff")]
    Staff,
    #[serde(rename = "processes")]
    Process,
}

impl EntityType {
    /// The key used for this entity in API responses and index names.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Person => "persons",
            EntityType::Asset => "assets",
            EntityType::Tenure => "tenures",
            EntityType::Account => "accounts",
            EntityType::Transaction => "transactions",
            EntityType::Staff => "staff",
            EntityType::Process => "processes",
        }
    }

    /// All entity types, in registry order.
    pub fn all() -> &'static [EntityType] {
        &[
            EntityType::Person,
            EntityType::Asset,
            EntityType::Tenure,
            EntityType::Account,
            EntityType::Transaction,
            EntityType::Staff,
            EntityType::Process,
        ]
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = HearthError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "persons" => Ok(EntityType::Person),
            "assets" => Ok(EntityType::Asset),
            "tenures" => Ok(EntityType::Tenure),
            "accounts" => Ok(EntityType::Account),
            "transactions" => Ok(EntityType::Transaction),
            "staff" => Ok(EntityType::Staff),
            "processes" => Ok(EntityType::Process),
            other => Err(HearthError::caller_input(format!(
                "unknown entity type '{other}'"
            ))),
        }
    }
}

/// A validated search request.
///
/// Input validation (minimum search-text length, safe-string checks) is
/// the calling layer's responsibility; this crate re-checks only the
/// paging bounds it depends on.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// The free-text search phrase. May be empty, in which case the
    /// composed query matches everything the filters allow.
    pub search_text: String,
    /// The collection to search.
    pub entity_type: EntityType,
    /// When set, wildcard matching over exact-value fields is disabled.
    pub exact_match: bool,
    /// Structural filters: filter name to the set of allowed values.
    /// Ordered maps keep composition deterministic.
    pub filters: BTreeMap<String, BTreeSet<String>>,
    /// 1-based page number; 0 and 1 both mean the first page.
    pub page: i64,
    /// Number of documents per page. Must be positive.
    pub page_size: i64,
    /// Named sort definition to apply; `None` means relevance order.
    pub sort_by: Option<String>,
    /// Direction applied uniformly across the sort definition's fields.
    pub descending: bool,
}

impl SearchRequest {
    /// Create a new request with default paging and no filters.
    pub fn new<S: Into<String>>(entity_type: EntityType, search_text: S) -> Self {
        SearchRequest {
            search_text: search_text.into(),
            entity_type,
            exact_match: false,
            filters: BTreeMap::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: None,
            descending: false,
        }
    }

    /// Set the page number.
    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Set the page size.
    pub fn page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    /// Require verbatim matching on exact-value fields.
    pub fn exact_match(mut self, exact_match: bool) -> Self {
        self.exact_match = exact_match;
        self
    }

    /// Add a structural filter.
    pub fn filter<N, I, V>(mut self, name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.filters
            .entry(name.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Set the sort key.
    pub fn sort_by<S: Into<String>>(mut self, sort_by: S) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    /// Set the sort direction.
    pub fn descending(mut self, descending: bool) -> Self {
        self.descending = descending;
        self
    }

    /// Whether the search phrase is empty or whitespace-only.
    pub fn has_search_text(&self) -> bool {
        !self.search_text.trim().is_empty()
    }
}
