use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

/// Format of the primary date column in folder tables
pub const METADATA_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Compact format of date range bounds (`20190701_000000`)
pub const RANGE_BOUND_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Parse a primary date cell (`2019:07:01 12:30:00`)
pub fn parse_metadata_date(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), METADATA_DATE_FORMAT)
        .map_err(|e| QueryError::DateParse { value: value.to_string(), reason: e.to_string() })
}

/// Parse a range bound (`20190701_123000`)
pub fn parse_range_bound(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), RANGE_BOUND_FORMAT).map_err(|e| {
        QueryError::DateParse {
            value: value.to_string(),
            reason: format!("{} (expected YYYYMMDD_HHMMSS)", e),
        }
    })
}

/// Inclusive date range, open on either side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    /// Build a range from optional compact bounds
    pub fn from_bounds(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        Ok(Self {
            start: start.map(parse_range_bound).transpose()?,
            end: end.map(parse_range_bound).transpose()?,
        })
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDateTime) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}
