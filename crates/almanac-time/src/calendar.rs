//! `TradingCalendar` trait.
//!
//! A trading calendar answers one question: is the market open on a given
//! date?  [`HolidayLedger`](crate::ledger::HolidayLedger) is the calendar
//! the rest of the crate works against.

use crate::date::Date;

/// A market calendar.
pub trait TradingCalendar: std::fmt::Debug + Send + Sync {
    /// Human-readable name (e.g. `"NYSE"`).
    fn name(&self) -> &str;

    /// Return `true` if `date` is a weekend according to this calendar.
    ///
    /// Most calendars consider Saturday and Sunday as weekends.
    fn is_weekend(&self, date: Date) -> bool {
        date.weekday().is_weekend()
    }

    /// Return `true` if the market is open on `date`.
    fn is_market_day(&self, date: Date) -> bool;
}
