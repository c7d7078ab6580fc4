//! Temporal statistics over primary dates.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::aggregate::GrabRequest;
use crate::archive::Archive;
use crate::error::Result;
use crate::search::SourceQuery;

/// Bin width of a temporal histogram
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Period {
    #[default]
    Year,
    Month,
    /// ISO week number
    Week,
    /// Day of year, with Feb 29 folded onto Feb 28
    #[value(name = "day")]
    DayOfYear,
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Bin key of one date for `period`
pub fn bin_of(date: &NaiveDateTime, period: Period) -> i32 {
    match period {
        Period::Year => date.year(),
        Period::Month => date.month() as i32,
        Period::Week => date.iso_week().week() as i32,
        Period::DayOfYear => {
            let day = date.ordinal() as i32;
            if is_leap_year(date.year()) && day >= 60 { day - 1 } else { day }
        }
    }
}

/// Count dates per bin, keyed in ascending bin order
pub fn histogram(dates: &[NaiveDateTime], period: Period) -> BTreeMap<i32, usize> {
    let mut bins = BTreeMap::new();
    for date in dates {
        *bins.entry(bin_of(date, period)).or_insert(0) += 1;
    }
    bins
}

/// Count dates per calendar day
pub fn daily_counts(dates: &[NaiveDateTime]) -> BTreeMap<NaiveDate, usize> {
    let mut days = BTreeMap::new();
    for date in dates {
        *days.entry(date.date()).or_insert(0) += 1;
    }
    days
}

/// Dates of the files matching one term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermOccurrences {
    pub term: String,
    pub dates: Vec<NaiveDateTime>,
}

/// Primary dates of the files matching each term, inside an optional range
pub fn occurrences<S: AsRef<str>>(
    archive: &mut Archive,
    terms: &[S],
    fields: Option<&[String]>,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<Vec<TermOccurrences>> {
    let date_field = archive.config().date_shorthand().to_string();

    let mut result = Vec::with_capacity(terms.len());
    for term in terms {
        let term = term.as_ref();
        let mut query = SourceQuery::new([term]).include_path(true);
        if let Some(fields) = fields {
            query = query.fields(fields.iter().cloned());
        }
        let files = archive.find_source(&query)?;

        let dates = if files.is_empty() {
            Vec::new()
        } else {
            let mut request =
                GrabRequest::new().source_files(files).fields([date_field.as_str()]).include_path(true);
            request.start_date = start.map(str::to_string);
            request.end_date = end.map(str::to_string);
            archive.grab_data(&request)?.dates(&date_field)
        };

        tracing::debug!(term, count = dates.len(), "collected occurrences");
        result.push(TermOccurrences { term: term.to_string(), dates });
    }
    Ok(result)
}
