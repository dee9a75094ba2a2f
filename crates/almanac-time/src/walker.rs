//! `DateWalker` — stepping through market days.
//!
//! A walker covers an inclusive date range and yields every day in it that is
//! neither a weekend (when weekends are skipped) nor a listed holiday.  The
//! range iterator hops from Friday straight to Monday; the single-step
//! [`next_market_day`] / [`prev_market_day`] searches move one weekday at a
//! time and give up after a fixed number of holiday hits.
//!
//! ```
//! use almanac_time::{Date, DateWalker, Holiday, HolidayLedger};
//!
//! let ledger = HolidayLedger::new([Holiday::new(
//!     Date::from_yyyymmdd(20240704).unwrap(),
//!     "Independence Day",
//! )])
//! .unwrap();
//! let walker = DateWalker::from_yyyymmdd(&ledger, "20240703", "20240708").unwrap();
//! assert_eq!(walker.array(), ["20240703", "20240705", "20240708"]);
//! ```

use crate::date::Date;
use crate::ledger::HolidayLedger;
use crate::weekday::Weekday;
use almanac_core::errors::{Error, Result};
use std::iter::FusedIterator;

/// A date range to be walked one market day at a time.
#[derive(Debug, Clone)]
pub struct DateWalker<'a> {
    ledger: &'a HolidayLedger,
    start: Date,
    end: Date,
    skip_weekends: bool,
    cursor: Date,
}

impl<'a> DateWalker<'a> {
    /// Walk `[start, end]` against `ledger`, skipping weekends.
    pub fn new(ledger: &'a HolidayLedger, start: Date, end: Date) -> Self {
        Self {
            ledger,
            start,
            end,
            skip_weekends: true,
            cursor: effective_start(start, true),
        }
    }

    /// Walk a range given as two `YYYYMMDD` strings.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDate`] if either string is not a valid date.
    /// An end before the start is not an error; the walk is simply empty.
    pub fn from_yyyymmdd(ledger: &'a HolidayLedger, start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(
            ledger,
            Date::parse_yyyymmdd(start)?,
            Date::parse_yyyymmdd(end)?,
        ))
    }

    /// Builder-style choice of whether Saturdays and Sundays are skipped.
    /// Holidays are skipped either way.
    pub fn with_skip_weekends(mut self, skip: bool) -> Self {
        self.skip_weekends = skip;
        self.cursor = effective_start(self.start, skip);
        self
    }

    /// First day of the range.
    pub fn start(&self) -> Date {
        self.start
    }

    /// Last day of the range.
    pub fn end(&self) -> Date {
        self.end
    }

    /// The market days in the range, lazily.  Each call starts over from
    /// the beginning of the range.
    pub fn market_days(&self) -> MarketDays<'a> {
        MarketDays::new(self.ledger, self.start, self.end, self.skip_weekends)
    }

    /// The market days in the range, collected.
    pub fn list(&self) -> Vec<Date> {
        self.market_days().collect()
    }

    /// Number of market days in the range.
    pub fn size(&self) -> usize {
        self.market_days().count()
    }

    /// The market days in the range as `YYYYMMDD` strings.
    pub fn array(&self) -> Vec<String> {
        self.market_days().map(|d| d.to_string()).collect()
    }

    /// The cursor position.  It starts on the first day of the range, moved
    /// forward to Monday when that day is a skipped weekend.
    pub fn cursor(&self) -> Date {
        self.cursor
    }

    /// The cursor position as a `YYYYMMDD` integer.
    pub fn yyyymmdd(&self) -> u32 {
        self.cursor.yyyymmdd()
    }

    /// Move the cursor to the next market day in the range and return it.
    /// Returns `None`, leaving the cursor alone, once the range is used up.
    pub fn advance(&mut self) -> Option<Date> {
        let from = self.cursor.next_day()?;
        let next = MarketDays::new(self.ledger, from, self.end, self.skip_weekends).next()?;
        self.cursor = next;
        Some(next)
    }

    /// Number of market days from the cursor through `end`, inclusive.
    pub fn count_days_til(&self, end: Date) -> usize {
        MarketDays::new(self.ledger, self.cursor, end, self.skip_weekends).count()
    }
}

impl std::fmt::Display for DateWalker<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Iterator over the market days of a range, in ascending order.
#[derive(Debug, Clone)]
pub struct MarketDays<'a> {
    ledger: &'a HolidayLedger,
    next: Option<Date>,
    end: Date,
    skip_weekends: bool,
}

impl<'a> MarketDays<'a> {
    fn new(ledger: &'a HolidayLedger, start: Date, end: Date, skip_weekends: bool) -> Self {
        Self {
            ledger,
            next: Some(effective_start(start, skip_weekends)),
            end,
            skip_weekends,
        }
    }

    fn step(&self, day: Date) -> Option<Date> {
        if self.skip_weekends && day.weekday() == Weekday::Friday {
            day.add_days(3).ok()
        } else {
            day.next_day()
        }
    }
}

impl Iterator for MarketDays<'_> {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        loop {
            let day = self.next.filter(|d| *d <= self.end)?;
            self.next = self.step(day);
            if !self.ledger.is_holiday(day) {
                return Some(day);
            }
        }
    }
}

impl FusedIterator for MarketDays<'_> {}

/// Where a walk from `start` really begins: the following Monday when
/// `start` is a skipped weekend.  The Friday hop relies on this.
fn effective_start(start: Date, skip_weekends: bool) -> Date {
    let skip = match start.weekday() {
        Weekday::Saturday if skip_weekends => 2,
        Weekday::Sunday if skip_weekends => 1,
        _ => 0,
    };
    // The last supported weekend is still followed by a Monday.
    start.add_days(skip).unwrap_or(start)
}

/// The market days in `[start, end]`, skipping weekends and holidays.
pub fn list_market_days(ledger: &HolidayLedger, start: Date, end: Date) -> MarketDays<'_> {
    MarketDays::new(ledger, start, end, true)
}

/// The first market day strictly after `date`.
///
/// Steps one weekday at a time; if `max_steps` consecutive weekdays are all
/// holidays the search fails with [`Error::WalkerStalled`].
pub fn next_market_day(ledger: &HolidayLedger, date: Date, max_steps: u32) -> Result<Date> {
    search(ledger, date, max_steps, Date::next_day)
}

/// The last market day strictly before `date`.  See [`next_market_day`].
pub fn prev_market_day(ledger: &HolidayLedger, date: Date, max_steps: u32) -> Result<Date> {
    search(ledger, date, max_steps, Date::previous_day)
}

/// [`next_market_day`] on `YYYYMMDD` integers.
pub fn next_market_day_ymd(ledger: &HolidayLedger, yyyymmdd: u32, max_steps: u32) -> Result<u32> {
    next_market_day(ledger, Date::from_yyyymmdd(yyyymmdd)?, max_steps).map(|d| d.yyyymmdd())
}

/// [`prev_market_day`] on `YYYYMMDD` integers.
pub fn prev_market_day_ymd(ledger: &HolidayLedger, yyyymmdd: u32, max_steps: u32) -> Result<u32> {
    prev_market_day(ledger, Date::from_yyyymmdd(yyyymmdd)?, max_steps).map(|d| d.yyyymmdd())
}

fn search(
    ledger: &HolidayLedger,
    from: Date,
    max_steps: u32,
    step: fn(Date) -> Option<Date>,
) -> Result<Date> {
    let mut day = from;
    for _ in 0..max_steps {
        day = weekday_step(day, step).ok_or_else(|| {
            Error::InvalidDate(format!("no weekday next to {day} in the supported range"))
        })?;
        if !ledger.is_holiday(day) {
            return Ok(day);
        }
    }
    tracing::debug!(%from, max_steps, "market day search stalled");
    Err(Error::WalkerStalled {
        from: from.to_string(),
        steps: max_steps,
    })
}

/// One step in the walk direction, then onwards past any Saturday/Sunday.
fn weekday_step(day: Date, step: fn(Date) -> Option<Date>) -> Option<Date> {
    let mut d = step(day)?;
    while d.weekday().is_weekend() {
        d = step(d)?;
    }
    Some(d)
}
