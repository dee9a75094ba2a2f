//! # almanac-time
//!
//! Dates, the holiday ledger, the market-day walker, and recurring-event
//! rules.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `TradingCalendar` trait.
pub mod calendar;

/// Built-in and text-loaded recurring-event catalogs.
pub mod catalog;

/// `Date` type.
pub mod date;

/// Loading a ledger from a holiday feed.
pub mod feed;

/// `Holiday` — a dated, named closure.
pub mod holiday;

/// `HolidayLedger` — sorted, immutable holiday lookups.
pub mod ledger;

/// `EventMatcher` — recurring events for a date.
pub mod matcher;

/// Recurring-event rules.
pub mod recurring;

/// `DateWalker` and market-day searches.
pub mod walker;

/// `Weekday` — day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use calendar::TradingCalendar;
pub use catalog::RuleCatalog;
pub use date::Date;
pub use feed::{FeedLoad, Rejection};
pub use holiday::Holiday;
pub use ledger::{HolidayLedger, NextHoliday};
pub use matcher::EventMatcher;
pub use recurring::{DaySpecifier, Ordinal, RecurringEvent};
pub use walker::{
    list_market_days, next_market_day, next_market_day_ymd, prev_market_day,
    prev_market_day_ymd, DateWalker, MarketDays,
};
pub use weekday::Weekday;
