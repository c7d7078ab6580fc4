//! Search term parsing and evaluation.
//!
//! [`parse_terms`] turns raw strings into classified [`QueryTerm`]s and
//! rejects query shapes that cannot be evaluated; [`TermMatcher`] compiles a
//! validated query once so it can be applied to many values.

pub mod matcher;
pub mod term;

pub use matcher::{CombineMode, TermMatcher};
pub use term::{QueryTerm, REGEX_METACHARACTERS, classify, parse_terms, validate};
