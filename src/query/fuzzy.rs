//! Edit-distance tolerance for fuzzy matching.

/// Fuzziness setting for multi-field match strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fuzziness {
    /// Edit distance scaled to term length: 0 below three characters,
    /// 1 for three to five, 2 above.
    Auto,
    /// A fixed maximum edit distance.
    Edits(u32),
}

impl Fuzziness {
    /// The maximum edit distance allowed for a term.
    pub fn max_edits(&self, term: &str) -> usize {
        match self {
            Fuzziness::Edits(n) => *n as usize,
            Fuzziness::Auto => match term.chars().count() {
                0..=2 => 0,
                3..=5 => 1,
                _ => 2,
            },
        }
    }

    /// The DSL rendering of this setting.
    pub fn as_str(&self) -> String {
        match self {
            Fuzziness::Auto => "AUTO".to_string(),
            Fuzziness::Edits(n) => n.to_string(),
        }
    }

    /// Whether two terms are within this fuzziness of each other,
    /// relative to the query term's length.
    pub fn matches(&self, query_term: &str, stored_term: &str) -> bool {
        let budget = self.max_edits(query_term);
        if budget == 0 {
            return query_term == stored_term;
        }
        levenshtein_within(query_term, stored_term, budget)
    }
}

/// Bounded Levenshtein distance check.
///
/// Returns whether the edit distance between `a` and `b` is at most
/// `budget`, bailing out early once every cell in a row exceeds it.
pub fn levenshtein_within(a: &str, b: &str, budget: usize) -> bool {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.len().abs_diff(b_chars.len()) > budget {
        return false;
    }

    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0usize; b_chars.len() + 1];

    for (i, &ca) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        let mut row_min = current[0];

        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (previous[j] + cost)
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
            row_min = row_min.min(current[j + 1]);
        }

        if row_min > budget {
            return false;
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()] <= budget
}
