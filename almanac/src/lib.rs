//! # almanac
//!
//! A trading-calendar rule engine: a holiday ledger, a market-day walker,
//! and recurring-event rules.
//!
//! This crate is a **façade** over the workspace crates.  It re-exports
//! them and adds [`Almanac`], which answers the usual calendar questions for
//! dates given in the canonical `YYYYMMDD` form.
//!
//! ```rust
//! use almanac::{Almanac, RuleCatalog, Settings};
//!
//! let feed = "20240101,New Year's Day\n20240704,Independence Day\n";
//! let (almanac, rejected) =
//!     Almanac::from_feed(feed, RuleCatalog::builtin(), Settings::default()).unwrap();
//! assert!(rejected.is_empty());
//! assert!(almanac.is_holiday(20240704));
//! assert_eq!(almanac.next_market_day(20240703).unwrap(), 20240705);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::sync::Once;

/// Error taxonomy, settings, and the relinkable handle.
pub use almanac_core as core;

/// Dates, ledger, walker, and recurring-event rules.
pub use almanac_time as time;

mod query;

pub use almanac_core::{Error, FeedMode, RelinkableHandle, Result, Settings};
pub use almanac_time::{
    Date, DateWalker, DaySpecifier, EventMatcher, Holiday, HolidayLedger, NextHoliday, Ordinal,
    RecurringEvent, Rejection, RuleCatalog, TradingCalendar, Weekday,
};
pub use query::{Almanac, DayFacts};

static TRACING_INIT: Once = Once::new();

/// Install a `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `almanac=info`.  Only the first call has any effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("almanac=info"));

        // Another subscriber may already be installed by the host application.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}
