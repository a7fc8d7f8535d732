//! Boolean query tree for composing backend searches.

pub mod boolean;
pub mod fuzzy;
pub mod multi_match;
pub mod nested;
#[allow(clippy::module_inception)]
pub mod query;
pub mod term;
pub mod wildcard;

pub use self::boolean::{BooleanClause, BooleanQuery, Occur};
pub use self::fuzzy::Fuzziness;
pub use self::multi_match::{MatchOperator, MultiMatchQuery, MultiMatchType};
pub use self::nested::NestedQuery;
pub use self::query::{MatchAllQuery, Query, field_values, value_text};
pub use self::term::{TermQuery, TermsQuery};
pub use self::wildcard::WildcardQuery;
