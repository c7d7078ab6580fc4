use regex::{Regex, RegexSet};
use serde::{Deserialize, Serialize};

use super::term::{QueryTerm, validate};
use crate::error::{QueryError, Result};

/// How several terms combine within one field value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombineMode {
    /// The value contains at least one term
    #[default]
    Any,
    /// The value contains every term
    ///
    /// Only meaningful within a single value. Files matching different terms
    /// in different fields are found by intersecting single-term searches.
    All,
}

/// Compiled form of a validated query
///
/// Literal terms use a plain substring test; whole-word terms compile to a
/// regex with the escaped term between non-word boundaries.
#[derive(Debug, Clone)]
pub enum TermMatcher {
    Literal(String),
    Pattern(Regex),
    AllOf(RegexSet),
}

impl TermMatcher {
    /// Compile classified terms
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidQuery`] if the terms fail [`validate`] or
    /// the resulting pattern cannot be compiled.
    pub fn new(terms: &[QueryTerm], mode: CombineMode) -> Result<Self> {
        validate(terms)?;

        if let [QueryTerm::Literal(text)] = terms {
            return Ok(Self::Literal(text.clone()));
        }

        let escaped: Vec<String> = terms.iter().map(|t| regex::escape(t.text())).collect();

        let matcher = match mode {
            CombineMode::All if escaped.len() > 1 => {
                let set = RegexSet::new(escaped.iter().map(|e| whole_word_pattern(e)))
                    .map_err(|e| QueryError::InvalidQuery(e.to_string()))?;
                Self::AllOf(set)
            }
            _ => {
                let regex = Regex::new(&whole_word_pattern(&escaped.join("|")))
                    .map_err(|e| QueryError::InvalidQuery(e.to_string()))?;
                Self::Pattern(regex)
            }
        };

        Ok(matcher)
    }

    pub fn is_match(&self, value: &str) -> bool {
        match self {
            Self::Literal(text) => value.contains(text.as_str()),
            Self::Pattern(regex) => regex.is_match(value),
            Self::AllOf(set) => set.matches(value).iter().count() == set.len(),
        }
    }
}

/// Anchor an already-escaped alternation between non-word boundaries
fn whole_word_pattern(escaped: &str) -> String {
    format!(r"(?:^|\W)(?:{})(?:\W|$)", escaped)
}
