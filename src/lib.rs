//! # Hearth
//!
//! A query composition engine for housing search services.
//!
//! Hearth turns a loosely-specified free-text search request into a
//! precisely scored boolean query against a document search backend,
//! and turns the backend's raw result set into a paginated, sorted,
//! typed response.
//!
//! ## Features
//!
//! - Wildcard tokenization for partial-word matching
//! - A library of scoring strategies (exact, wildcard, best-fields,
//!   cross-fields, most-fields, nested) with per-entity boosts
//! - Non-scoring structural filters
//! - Per-entity index resolution, named sort definitions, and paging
//! - A pluggable [`search::SearchExecutor`] boundary with an in-memory
//!   reference implementation

pub mod analysis;
pub mod compose;
pub mod error;
pub mod query;
pub mod request;
pub mod response;
pub mod search;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
