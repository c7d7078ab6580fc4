use serde::{Deserialize, Serialize};

use crate::archive::Archive;
use crate::error::Result;
use crate::search::SourceQuery;
use crate::sets::intersect_all;

/// Labelled matrix relating two keyword axes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatrix<T> {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub values: Vec<Vec<T>>,
}

impl<T: Copy> KeywordMatrix<T> {
    pub fn get(&self, row: usize, column: usize) -> Option<T> {
        self.values.get(row)?.get(column).copied()
    }
}

/// Jaccard index of two result sets, 0 when both are empty
pub fn jaccard(a: &[String], b: &[String]) -> f64 {
    let shared = intersect_all(&[a.to_vec(), b.to_vec()]).len();
    let union = a.len() + b.len() - shared;
    if union == 0 { 0.0 } else { shared as f64 / union as f64 }
}

fn matches_per_keyword<S: AsRef<str>>(
    archive: &mut Archive,
    keywords: &[S],
    fields: Option<&[String]>,
) -> Result<Vec<Vec<String>>> {
    keywords
        .iter()
        .map(|keyword| {
            let mut query = SourceQuery::new([keyword.as_ref()]);
            if let Some(fields) = fields {
                query = query.fields(fields.iter().cloned());
            }
            archive.find_source(&query)
        })
        .collect()
}

fn labels<S: AsRef<str>>(keywords: &[S]) -> Vec<String> {
    keywords.iter().map(|k| k.as_ref().to_string()).collect()
}

/// Number of files shared by every pair of keywords
///
/// Symmetric with a zero diagonal.
pub fn co_occurrence<S: AsRef<str>>(
    archive: &mut Archive,
    keywords: &[S],
    fields: Option<&[String]>,
) -> Result<KeywordMatrix<usize>> {
    let found = matches_per_keyword(archive, keywords, fields)?;
    let n = found.len();
    let mut values = vec![vec![0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let shared = intersect_all(&[found[i].clone(), found[j].clone()]).len();
            values[i][j] = shared;
            values[j][i] = shared;
        }
    }

    Ok(KeywordMatrix { rows: labels(keywords), columns: labels(keywords), values })
}

/// Pairwise Jaccard similarity of keywords within one field
///
/// Symmetric with a zero diagonal.
pub fn self_correlation<S: AsRef<str>>(
    archive: &mut Archive,
    field: &str,
    keywords: &[S],
) -> Result<KeywordMatrix<f64>> {
    let fields = [field.to_string()];
    let found = matches_per_keyword(archive, keywords, Some(&fields))?;
    let n = found.len();
    let mut values = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let index = jaccard(&found[i], &found[j]);
            values[i][j] = index;
            values[j][i] = index;
        }
    }

    Ok(KeywordMatrix { rows: labels(keywords), columns: labels(keywords), values })
}

/// Jaccard similarity between keywords of two fields
pub fn cross_correlation<S: AsRef<str>, U: AsRef<str>>(
    archive: &mut Archive,
    field_x: &str,
    keywords_x: &[S],
    field_y: &str,
    keywords_y: &[U],
) -> Result<KeywordMatrix<f64>> {
    let fields_x = [field_x.to_string()];
    let fields_y = [field_y.to_string()];
    let found_x = matches_per_keyword(archive, keywords_x, Some(&fields_x))?;
    let found_y = matches_per_keyword(archive, keywords_y, Some(&fields_y))?;

    let values = found_x.iter().map(|a| found_y.iter().map(|b| jaccard(a, b)).collect()).collect();

    Ok(KeywordMatrix { rows: labels(keywords_x), columns: labels(keywords_y), values })
}

/// Most frequent tags of a field, after exclusion and inclusion filters
pub fn top_keywords<S: AsRef<str>>(
    archive: &mut Archive,
    field: &str,
    n: usize,
    exclude: &[S],
    include: Option<&[S]>,
) -> Result<Vec<String>> {
    let mut table = archive.count_field(field)?.exclude(exclude);
    if let Some(include) = include {
        table = table.include(include);
    }
    Ok(table.top(n).tokens().into_iter().map(str::to_string).collect())
}
