//! `Holiday` — a dated, named market closure.

use crate::date::Date;
use almanac_core::ensure_entry;
use almanac_core::errors::{Error, Result};
use almanac_core::utilities::data_parsers::split_record;
use std::cmp::Ordering;

/// A holiday: a date and a display name.
///
/// Equality and ordering look at the date only, so a ledger can be searched
/// and sorted by date without caring how a holiday is labelled.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Holiday {
    date: Date,
    name: String,
}

impl Holiday {
    /// Create a holiday.
    pub fn new(date: Date, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
        }
    }

    /// Parse one `YYYYMMDD,name` record.
    ///
    /// Everything after the first comma is the name, so names may contain
    /// commas of their own.
    pub fn parse_record(s: &str) -> Result<Self> {
        Self::parse_line(0, s)
    }

    /// Parse a record, attributing any error to `line`.
    pub(crate) fn parse_line(line: usize, s: &str) -> Result<Self> {
        let fields = split_record(s, 2);
        ensure_entry!(fields.len() == 2, line, "expected `YYYYMMDD,name`, got {s:?}");
        let name = fields[1];
        ensure_entry!(!name.is_empty(), line, "holiday on {} has no name", fields[0]);
        let date = Date::parse_yyyymmdd(fields[0]).map_err(|e| Error::MalformedEntry {
            line,
            reason: e.to_string(),
        })?;
        Ok(Self::new(date, name))
    }

    /// The date of the holiday.
    pub fn date(&self) -> Date {
        self.date
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The date in canonical `YYYYMMDD` form.
    pub fn yyyymmdd(&self) -> u32 {
        self.date.yyyymmdd()
    }
}

impl PartialEq for Holiday {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
    }
}

impl Eq for Holiday {}

impl PartialOrd for Holiday {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Holiday {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date.cmp(&other.date)
    }
}

impl std::fmt::Display for Holiday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.date, self.name)
    }
}
