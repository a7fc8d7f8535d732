//! Wildcard query implementation for pattern matching.

use regex::{Regex, RegexBuilder};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::error::{HearthError, Result};
use crate::query::query::{Query, field_values, value_text};

/// A query that matches documents whose field value matches a wildcard
/// pattern.
///
/// `*` matches zero or more characters and `?` matches exactly one.
/// Patterns match the whole stored value, case-insensitively; the
/// tokenizer's `*word*` terms therefore behave as substring matches.
#[derive(Debug, Clone)]
pub struct WildcardQuery {
    field: String,
    pattern: String,
    regex: Arc<Regex>,
    boost: f32,
}

impl WildcardQuery {
    /// Create a new wildcard query.
    pub fn new<F, P>(field: F, pattern: P) -> Result<Self>
    where
        F: Into<String>,
        P: Into<String>,
    {
        let field = field.into();
        let pattern = pattern.into();
        let regex = Self::compile_pattern(&pattern)?;

        Ok(WildcardQuery {
            field,
            pattern,
            regex: Arc::new(regex),
            boost: 1.0,
        })
    }

    /// Set the boost factor for this query.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the wildcard pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Compile a wildcard pattern into an anchored regex.
    fn compile_pattern(pattern: &str) -> Result<Regex> {
        let mut regex_pattern = String::with_capacity(pattern.len() + 2);
        regex_pattern.push('^');

        for c in pattern.chars() {
            match c {
                '*' => regex_pattern.push_str(".*"),
                '?' => regex_pattern.push('.'),
                other => regex_pattern.push_str(&regex::escape(&other.to_string())),
            }
        }

        regex_pattern.push('$');

        RegexBuilder::new(&regex_pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                HearthError::caller_input(format!("invalid wildcard pattern '{pattern}': {e}"))
            })
    }
}

impl Query for WildcardQuery {
    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        format!("wildcard({}:{})", self.field, self.pattern)
    }

    fn to_json(&self) -> Value {
        let mut body = json!({ "value": self.pattern });
        if self.boost != 1.0 {
            body["boost"] = json!(self.boost);
        }
        json!({ "wildcard": { (self.field.as_str()): body } })
    }

    fn score(&self, doc: &Value) -> Option<f32> {
        let matched = field_values(doc, &self.field)
            .iter()
            .filter_map(|v| value_text(v))
            .any(|text| self.regex.is_match(&text));
        matched.then_some(self.boost)
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }
}
