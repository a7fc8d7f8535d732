//! Sort key resolution.

use log::warn;
use serde_json::{Value, json};

use crate::compose::profile::EntityProfile;

/// Field ordering direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// The DSL rendering of this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// One component of a sort specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub field: String,
    pub order: SortOrder,
}

/// An ordered field sequence; empty means relevance-score descending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    fields: Vec<SortField>,
}

impl SortSpec {
    /// The relevance (empty) spec.
    pub fn relevance() -> Self {
        SortSpec::default()
    }

    /// Build a spec from a field sequence with one direction applied
    /// uniformly.
    pub fn uniform<I>(fields: I, order: SortOrder) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        SortSpec {
            fields: fields
                .into_iter()
                .map(|field| SortField {
                    field: field.into(),
                    order,
                })
                .collect(),
        }
    }

    /// Whether this spec falls back to relevance ordering.
    pub fn is_relevance(&self) -> bool {
        self.fields.is_empty()
    }

    /// The component fields, outermost first.
    pub fn fields(&self) -> &[SortField] {
        &self.fields
    }

    /// The DSL rendering of this spec.
    pub fn to_json(&self) -> Value {
        Value::Array(
            self.fields
                .iter()
                .map(|f| json!({ (f.field.as_str()): { "order": f.order.as_str() } }))
                .collect(),
        )
    }
}

/// Resolve a user-supplied sort key against an entity profile.
///
/// No key means relevance order. An unrecognized key also falls back to
/// relevance — sort is a ranking refinement, not a correctness gate —
/// with a warning for operators.
pub fn resolve_sort(
    profile: &EntityProfile,
    sort_by: Option<&str>,
    descending: bool,
) -> SortSpec {
    let Some(key) = sort_by else {
        return SortSpec::relevance();
    };

    let order = if descending {
        SortOrder::Desc
    } else {
        SortOrder::Asc
    };

    match profile.sort_fields(key) {
        Some(fields) => SortSpec::uniform(fields.iter().cloned(), order),
        None => {
            warn!(
                "unknown sort key '{}' for '{}', falling back to relevance",
                key,
                profile.entity_type()
            );
            SortSpec::relevance()
        }
    }
}
