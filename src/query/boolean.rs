//! Boolean query implementation for combining multiple queries.

use serde_json::{Value, json};

use crate::query::query::Query;

/// Occurrence requirements for boolean clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occur {
    /// The clause must match and contributes to the score.
    Must,
    /// The clause should match (OR semantics).
    Should,
    /// The clause must not match.
    MustNot,
    /// The clause must match but never contributes to the score.
    Filter,
}

impl Occur {
    fn key(&self) -> &'static str {
        match self {
            Occur::Must => "must",
            Occur::Should => "should",
            Occur::MustNot => "must_not",
            Occur::Filter => "filter",
        }
    }
}

/// A clause in a boolean query.
#[derive(Debug, Clone)]
pub struct BooleanClause {
    /// The query for this clause.
    pub query: Box<dyn Query>,
    /// The occurrence requirement.
    pub occur: Occur,
}

impl BooleanClause {
    /// Create a new boolean clause.
    pub fn new(query: Box<dyn Query>, occur: Occur) -> Self {
        BooleanClause { query, occur }
    }
}

/// A boolean query that combines multiple queries with boolean logic.
///
/// Scored clauses combine with OR ("should") semantics gated by
/// `minimum_should_match`; structural filters attach with AND
/// ("filter") semantics without influencing ranking.
#[derive(Debug, Clone)]
pub struct BooleanQuery {
    clauses: Vec<BooleanClause>,
    boost: f32,
    minimum_should_match: usize,
}

impl BooleanQuery {
    /// Create a new empty boolean query.
    pub fn new() -> Self {
        BooleanQuery {
            clauses: Vec::new(),
            boost: 1.0,
            minimum_should_match: 0,
        }
    }

    /// Add a clause to this boolean query.
    pub fn add_clause(&mut self, clause: BooleanClause) {
        self.clauses.push(clause);
    }

    /// Add a MUST clause.
    pub fn add_must(&mut self, query: Box<dyn Query>) {
        self.add_clause(BooleanClause::new(query, Occur::Must));
    }

    /// Add a SHOULD clause.
    pub fn add_should(&mut self, query: Box<dyn Query>) {
        self.add_clause(BooleanClause::new(query, Occur::Should));
    }

    /// Add a MUST_NOT clause.
    pub fn add_must_not(&mut self, query: Box<dyn Query>) {
        self.add_clause(BooleanClause::new(query, Occur::MustNot));
    }

    /// Add a non-scoring FILTER clause.
    pub fn add_filter(&mut self, query: Box<dyn Query>) {
        self.add_clause(BooleanClause::new(query, Occur::Filter));
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// Set the minimum number of should clauses that must match.
    pub fn with_minimum_should_match(mut self, minimum: usize) -> Self {
        self.minimum_should_match = minimum;
        self
    }

    /// Get the clauses.
    pub fn clauses(&self) -> &[BooleanClause] {
        &self.clauses
    }

    /// Get the minimum should match value.
    pub fn minimum_should_match(&self) -> usize {
        self.minimum_should_match
    }

    /// Check if this query has no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Get clauses by occurrence type.
    pub fn clauses_by_occur(&self, occur: Occur) -> Vec<&BooleanClause> {
        self.clauses.iter().filter(|c| c.occur == occur).collect()
    }
}

impl Default for BooleanQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl Query for BooleanQuery {
    fn boost(&self) -> f32 {
        self.boost
    }

    fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    fn description(&self) -> String {
        let parts: Vec<String> = self
            .clauses
            .iter()
            .map(|c| format!("{}({})", c.occur.key(), c.query.description()))
            .collect();
        format!("bool[{}]", parts.join(", "))
    }

    fn to_json(&self) -> Value {
        let mut body = serde_json::Map::new();
        for occur in [Occur::Must, Occur::Should, Occur::MustNot, Occur::Filter] {
            let fragments: Vec<Value> = self
                .clauses_by_occur(occur)
                .iter()
                .map(|c| c.query.to_json())
                .collect();
            if !fragments.is_empty() {
                body.insert(occur.key().to_string(), Value::Array(fragments));
            }
        }
        if self.minimum_should_match > 0 {
            body.insert(
                "minimum_should_match".to_string(),
                json!(self.minimum_should_match),
            );
        }
        if self.boost != 1.0 {
            body.insert("boost".to_string(), json!(self.boost));
        }
        json!({ "bool": body })
    }

    fn score(&self, doc: &Value) -> Option<f32> {
        let mut total = 0.0f32;

        for clause in self.clauses_by_occur(Occur::Must) {
            total += clause.query.score(doc)?;
        }
        for clause in self.clauses_by_occur(Occur::Filter) {
            clause.query.score(doc)?;
        }
        for clause in self.clauses_by_occur(Occur::MustNot) {
            if clause.query.score(doc).is_some() {
                return None;
            }
        }

        let mut should_matched = 0usize;
        for clause in self.clauses_by_occur(Occur::Should) {
            if let Some(score) = clause.query.score(doc) {
                should_matched += 1;
                total += score;
            }
        }
        if should_matched < self.minimum_should_match {
            return None;
        }

        Some(total * self.boost)
    }

    fn clone_box(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }
}
