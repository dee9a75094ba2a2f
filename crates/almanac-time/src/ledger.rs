//! `HolidayLedger` — the sorted, immutable list of market holidays.
//!
//! A ledger is only ever built through a validating constructor that sorts
//! its input and rejects duplicate dates, so every lookup can binary-search
//! without re-checking.  There is no way to add or remove a holiday once the
//! ledger exists; to change the list, build a new ledger and swap it in.

use crate::calendar::TradingCalendar;
use crate::date::Date;
use crate::holiday::Holiday;
use almanac_core::errors::{Error, Result};

/// Offset added to a `YYYYMMDD` value to move it one year later.
const ONE_YEAR_YYYYMMDD: u32 = 10_000;

/// Answer to "when is the next holiday?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextHoliday<'a> {
    /// A holiday that is in the ledger.
    Listed(&'a Holiday),
    /// No listed holiday follows the query date.  The value is the last
    /// listed holiday's `YYYYMMDD` plus one year, a placeholder that may not
    /// even be a real calendar day (`20240229` becomes `20250229`).
    Estimated(u32),
}

impl NextHoliday<'_> {
    /// The answer as a `YYYYMMDD` integer.
    pub fn yyyymmdd(&self) -> u32 {
        match self {
            NextHoliday::Listed(h) => h.yyyymmdd(),
            NextHoliday::Estimated(n) => *n,
        }
    }

    /// Whether the answer is the one-year placeholder.
    pub fn is_estimate(&self) -> bool {
        matches!(self, NextHoliday::Estimated(_))
    }

    /// The listed holiday, if the answer came from the ledger.
    pub fn holiday(&self) -> Option<&Holiday> {
        match self {
            NextHoliday::Listed(h) => Some(h),
            NextHoliday::Estimated(_) => None,
        }
    }
}

/// An ordered, de-duplicated collection of holidays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayLedger {
    name: String,
    holidays: Vec<Holiday>,
}

impl HolidayLedger {
    /// Name given to ledgers that were not explicitly named.
    pub const DEFAULT_NAME: &'static str = "Holidays";

    /// Build a ledger from holidays in any order.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateHoliday`] if two entries share a date.
    pub fn new(holidays: impl IntoIterator<Item = Holiday>) -> Result<Self> {
        let mut holidays: Vec<Holiday> = holidays.into_iter().collect();
        holidays.sort();
        if let Some(pair) = holidays.windows(2).find(|w| w[0] == w[1]) {
            return Err(Error::DuplicateHoliday(pair[0].date().to_string()));
        }
        let ledger = Self {
            name: Self::DEFAULT_NAME.to_string(),
            holidays,
        };
        ledger.log_built();
        Ok(ledger)
    }

    /// A ledger with no holidays; every weekday is a market day.
    pub fn empty() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            holidays: Vec::new(),
        }
    }

    /// Build from holidays that are already sorted and unique.
    pub(crate) fn from_sorted(holidays: Vec<Holiday>) -> Self {
        debug_assert!(holidays.windows(2).all(|w| w[0] < w[1]));
        let ledger = Self {
            name: Self::DEFAULT_NAME.to_string(),
            holidays,
        };
        ledger.log_built();
        ledger
    }

    /// Builder-style override of the ledger's name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn log_built(&self) {
        tracing::info!(
            ledger = %self.name,
            count = self.holidays.len(),
            first = ?self.first().map(Holiday::yyyymmdd),
            last = ?self.last().map(Holiday::yyyymmdd),
            "holiday ledger built"
        );
    }

    // ── Inspectors ───────────────────────────────────────────────────────

    /// Number of holidays.
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Whether the ledger has no holidays.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    /// Holidays in ascending date order.
    pub fn iter(&self) -> std::slice::Iter<'_, Holiday> {
        self.holidays.iter()
    }

    /// The earliest holiday.
    pub fn first(&self) -> Option<&Holiday> {
        self.holidays.first()
    }

    /// The latest holiday.
    pub fn last(&self) -> Option<&Holiday> {
        self.holidays.last()
    }

    // ── Lookups ──────────────────────────────────────────────────────────

    fn search(&self, date: Date) -> std::result::Result<usize, usize> {
        self.holidays.binary_search_by_key(&date, Holiday::date)
    }

    /// Whether `date` is a listed holiday.
    pub fn is_holiday(&self, date: Date) -> bool {
        self.search(date).is_ok()
    }

    /// The holiday on `date`, if any.
    pub fn fetch(&self, date: Date) -> Option<&Holiday> {
        self.search(date).ok().map(|i| &self.holidays[i])
    }

    /// [`is_holiday`](Self::is_holiday) keyed by a `YYYYMMDD` integer.
    /// A value that is not a valid date is simply not a holiday.
    pub fn is_holiday_ymd(&self, yyyymmdd: u32) -> bool {
        self.fetch_ymd(yyyymmdd).is_some()
    }

    /// [`fetch`](Self::fetch) keyed by a `YYYYMMDD` integer.
    pub fn fetch_ymd(&self, yyyymmdd: u32) -> Option<&Holiday> {
        Date::from_yyyymmdd(yyyymmdd)
            .ok()
            .and_then(|d| self.fetch(d))
    }

    /// The first holiday strictly after `date`.
    ///
    /// A holiday on `date` itself does not count.  When nothing follows,
    /// the answer is [`NextHoliday::Estimated`]; an empty ledger has no
    /// answer at all.
    pub fn next_holiday(&self, date: Date) -> Option<NextHoliday<'_>> {
        let last = self.holidays.last()?;
        let idx = match self.search(date) {
            Ok(i) => i + 1,
            Err(i) => i,
        };
        Some(match self.holidays.get(idx) {
            Some(h) => NextHoliday::Listed(h),
            None => NextHoliday::Estimated(last.yyyymmdd() + ONE_YEAR_YYYYMMDD),
        })
    }

    /// The holidays falling in `[start, end]`, in date order.
    pub fn between(&self, start: Date, end: Date) -> &[Holiday] {
        if end < start {
            return &[];
        }
        let lo = self.search(start).unwrap_or_else(|i| i);
        let hi = match self.search(end) {
            Ok(i) => i + 1,
            Err(i) => i,
        };
        &self.holidays[lo..hi]
    }

    /// Render the ledger in the feed format, one `YYYYMMDD,name` per line.
    pub fn to_feed(&self) -> String {
        self.holidays.iter().map(|h| format!("{h}\n")).collect()
    }
}

impl Default for HolidayLedger {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a HolidayLedger {
    type Item = &'a Holiday;
    type IntoIter = std::slice::Iter<'a, Holiday>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TradingCalendar for HolidayLedger {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_market_day(&self, date: Date) -> bool {
        !self.is_weekend(date) && !self.is_holiday(date)
    }
}
