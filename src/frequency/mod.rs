//! Tag frequency counting for delimiter-packed fields.
//!
//! A cell such as `"Paris, France, Eiffel Tower"` packs several tags. Counting
//! works on literal substring occurrences across the whole column, which
//! double-counts a short tag that is also part of a longer one (`Paris` inside
//! `Paris Zoo`). A single correction pass subtracts, from every token, the raw
//! counts of all distinct tokens that strictly contain it.
//!
//! The correction is not iterated to a fixed point: with
//! three-way containment chains the result can over-correct, and that is the
//! defined behavior.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One token and its corrected count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub token: String,
    pub count: i64,
}

/// Tokens ordered by corrected count, highest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Corrected count of a token, if it was seen
    pub fn count_of(&self, token: &str) -> Option<i64> {
        self.entries.iter().find(|e| e.token == token).map(|e| e.count)
    }

    pub fn tokens(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.token.as_str()).collect()
    }

    /// Keep the first `n` entries
    pub fn top(mut self, n: usize) -> Self {
        self.entries.truncate(n);
        self
    }

    /// Drop entries whose token contains any of `patterns`
    pub fn exclude<S: AsRef<str>>(mut self, patterns: &[S]) -> Self {
        self.entries.retain(|e| !patterns.iter().any(|p| e.token.contains(p.as_ref())));
        self
    }

    /// Keep only entries whose token is one of `tokens`
    pub fn include<S: AsRef<str>>(mut self, tokens: &[S]) -> Self {
        self.entries.retain(|e| tokens.iter().any(|t| e.token == t.as_ref()));
        self
    }
}

/// Count the tags of a delimiter-packed column
///
/// `values` is the full column; `None` and empty strings are missing cells.
/// Raw counts are taken over every cell (repeats included), not only the
/// distinct ones. Ties keep first-seen token order.
pub fn count_unique<'a, I>(values: I, delimiter: &str) -> FrequencyTable
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let cells: Vec<&str> = values.into_iter().flatten().filter(|v| !v.is_empty()).collect();

    let mut seen_cells = HashSet::new();
    let mut seen_tokens = HashSet::new();
    let mut tokens: Vec<&str> = Vec::new();
    for cell in &cells {
        if !seen_cells.insert(*cell) {
            continue;
        }
        for token in split_cell(cell, delimiter) {
            if seen_tokens.insert(token) {
                tokens.push(token);
            }
        }
    }

    let raw: Vec<i64> = tokens
        .iter()
        .map(|token| cells.iter().filter(|cell| cell.contains(token)).count() as i64)
        .collect();

    let mut entries: Vec<FrequencyEntry> = tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let overlap: i64 = tokens
                .iter()
                .enumerate()
                .filter(|&(j, longer)| j != i && longer.len() > token.len() && longer.contains(token))
                .map(|(j, _)| raw[j])
                .sum();
            FrequencyEntry { token: token.to_string(), count: raw[i] - overlap }
        })
        .collect();

    // Stable sort keeps first-seen order among equal counts
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    FrequencyTable { entries }
}

/// Non-empty tokens of one cell
fn split_cell<'a>(cell: &'a str, delimiter: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    let parts: Box<dyn Iterator<Item = &'a str>> =
        if delimiter.is_empty() { Box::new(std::iter::once(cell)) } else { Box::new(cell.split(delimiter)) };
    parts.filter(|token| !token.is_empty())
}
