//! Search term classification.
//!
//! A term is classified once, up front, and the resulting [`QueryTerm`] is
//! matched on from then on:
//!
//! - [`QueryTerm::Literal`] - the term starts or ends with a regex
//!   metacharacter (`C++`, `(1999)`, `*beach`). Word boundaries cannot be
//!   anchored next to such characters, so it is matched as a plain substring.
//! - [`QueryTerm::WholeWord`] - anything else. Matched only when bounded by
//!   non-word characters or the ends of the value.
//!
//! Literal terms cannot be combined with other terms into one pattern, so a
//! multi-term query containing one is rejected by [`validate`].

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

/// Characters with special meaning in a regular expression
pub const REGEX_METACHARACTERS: &[char] =
    &['.', '^', '$', '*', '+', '?', '{', '}', '[', ']', '\\', '|', '(', ')'];

/// A classified search term
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryTerm {
    /// Raw substring containment
    Literal(String),
    /// Exact token bounded by non-word characters
    WholeWord(String),
}

impl QueryTerm {
    /// Classify a single term by its first and last character
    pub fn classify(term: &str) -> Self {
        let bordered = term.starts_with(REGEX_METACHARACTERS) || term.ends_with(REGEX_METACHARACTERS);
        if bordered { Self::Literal(term.to_string()) } else { Self::WholeWord(term.to_string()) }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Literal(text) | Self::WholeWord(text) => text,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

/// Classify every term, preserving order
pub fn classify<S: AsRef<str>>(terms: &[S]) -> Vec<QueryTerm> {
    terms.iter().map(|t| QueryTerm::classify(t.as_ref())).collect()
}

/// Check that a classified query can be evaluated
///
/// # Errors
///
/// Returns [`QueryError::InvalidQuery`] if:
/// - There are no terms
/// - A term is empty (an empty pattern would match every value)
/// - A `Literal` term appears in a query with more than one term
pub fn validate(terms: &[QueryTerm]) -> Result<()> {
    if terms.is_empty() {
        return Err(QueryError::InvalidQuery("no search terms given".to_string()));
    }

    if terms.iter().any(|t| t.text().is_empty()) {
        return Err(QueryError::InvalidQuery("empty search term".to_string()));
    }

    if terms.len() > 1
        && let Some(literal) = terms.iter().find(|t| t.is_literal())
    {
        return Err(QueryError::InvalidQuery(format!(
            "term '{}' begins or ends with a regex metacharacter and can only be searched on its own",
            literal.text()
        )));
    }

    Ok(())
}

/// Classify and validate in one step
pub fn parse_terms<S: AsRef<str>>(terms: &[S]) -> Result<Vec<QueryTerm>> {
    let parsed = classify(terms);
    validate(&parsed)?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_plain_word() {
        assert_eq!(QueryTerm::classify("beach"), QueryTerm::WholeWord("beach".to_string()));
        assert_eq!(QueryTerm::classify("New York"), QueryTerm::WholeWord("New York".to_string()));
    }

    #[test]
    fn test_classify_bordered_terms() {
        assert!(QueryTerm::classify("C++").is_literal());
        assert!(QueryTerm::classify("*beach").is_literal());
        assert!(QueryTerm::classify("(1999)").is_literal());
        assert!(QueryTerm::classify("end.").is_literal());
    }

    #[test]
    fn test_classify_inner_metacharacters_stay_whole_word() {
        assert_eq!(QueryTerm::classify("a.b"), QueryTerm::WholeWord("a.b".to_string()));
    }

    #[test]
    fn test_validate_single_literal_ok() {
        assert!(validate(&classify(&["C++"])).is_ok());
    }

    #[test]
    fn test_validate_rejects_mixed_multi_term() {
        let err = validate(&classify(&["beach", "C++"])).unwrap_err();
        assert!(matches!(err, QueryError::InvalidQuery(_)));
        assert!(err.to_string().contains("C++"));
    }

    #[test]
    fn test_validate_rejects_empty_input() {
        let none: [&str; 0] = [];
        assert!(validate(&classify(&none)).is_err());
        assert!(validate(&classify(&[""])).is_err());
    }

    #[test]
    fn test_parse_terms_multi_whole_word() {
        let parsed = parse_terms(&["cat", "dog"]).unwrap();
        assert_eq!(
            parsed,
            vec![QueryTerm::WholeWord("cat".to_string()), QueryTerm::WholeWord("dog".to_string())]
        );
    }
}
