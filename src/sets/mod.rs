//! Set algebra over result lists.
//!
//! Used to compose queries that a single search cannot express, e.g. files
//! tagged `cat` in one field and `Paris` in another:
//!
//! ```no_run
//! use metadata_explorer::sets::intersect_all;
//!
//! # let cats: Vec<String> = vec![];
//! # let paris: Vec<String> = vec![];
//! let both = intersect_all(&[cats, paris]);
//! ```
//!
//! All results are sorted and deduplicated, whatever the input order.

use std::collections::BTreeSet;

use crate::error::{QueryError, Result};

/// Intersection of every list, seeded by the first
///
/// No lists at all is an empty intersection.
pub fn intersect_all<T: Ord + Clone>(lists: &[Vec<T>]) -> Vec<T> {
    let Some((first, rest)) = lists.split_first() else {
        return Vec::new();
    };

    let mut result: BTreeSet<T> = first.iter().cloned().collect();
    for list in rest {
        if result.is_empty() {
            break;
        }
        let other: BTreeSet<&T> = list.iter().collect();
        result.retain(|item| other.contains(item));
    }

    result.into_iter().collect()
}

/// Elements present in exactly one of two lists
///
/// # Errors
///
/// Returns [`QueryError::Arity`] unless exactly two lists are given.
pub fn symmetric_difference<T: Ord + Clone>(lists: &[Vec<T>]) -> Result<Vec<T>> {
    let [a, b] = lists else {
        return Err(QueryError::Arity { expected: 2, found: lists.len() });
    };

    let a: BTreeSet<&T> = a.iter().collect();
    let b: BTreeSet<&T> = b.iter().collect();
    Ok(a.symmetric_difference(&b).map(|&item| item.clone()).collect())
}

/// Elements of the first list missing from the second
///
/// Equivalent to `A ∩ (A △ B)`.
pub fn difference<T: Ord + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let b: BTreeSet<&T> = b.iter().collect();
    let a: BTreeSet<&T> = a.iter().collect();
    a.difference(&b).map(|&item| item.clone()).collect()
}
