//! Derived statistics over an [`Archive`](crate::archive::Archive).
//!
//! These produce the numbers behind keyword-connection heatmaps and
//! timeline histograms; drawing them is left to the caller.

pub mod connections;
pub mod temporal;

pub use connections::{
    KeywordMatrix, co_occurrence, cross_correlation, jaccard, self_correlation, top_keywords,
};
pub use temporal::{Period, TermOccurrences, bin_of, daily_counts, histogram, occurrences};
