//! `Almanac` — the `YYYYMMDD` query surface.

use almanac_core::{RelinkableHandle, Result, Settings};
use almanac_time::{
    next_market_day, prev_market_day, Date, DateWalker, EventMatcher, Holiday, HolidayLedger,
    RecurringEvent, Rejection, RuleCatalog, TradingCalendar,
};
use std::path::Path;
use std::sync::Arc;

/// Everything known about one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayFacts {
    /// The date.
    pub date: Date,
    /// Name of the holiday on this date, if it is one.
    pub holiday: Option<String>,
    /// The next holiday as `YYYYMMDD`, or `None` with an empty ledger.
    pub next_holiday: Option<u32>,
    /// Whether `next_holiday` is the one-year placeholder rather than a
    /// listed holiday.
    pub next_holiday_estimated: bool,
    /// Whether the market is open.
    pub is_market_day: bool,
    /// Recurring events falling on the date, in catalog order.
    pub events: Vec<RecurringEvent>,
}

/// A holiday ledger and a rule catalog behind one set of queries.
///
/// The ledger sits behind a [`RelinkableHandle`]: [`reload`](Self::reload)
/// swaps in a complete new ledger while queries already running keep the
/// snapshot they started with.
#[derive(Debug, Clone)]
pub struct Almanac {
    ledger: RelinkableHandle<HolidayLedger>,
    matcher: EventMatcher,
    settings: Settings,
}

impl Almanac {
    /// Bundle a ledger and a catalog.
    pub fn new(ledger: HolidayLedger, catalog: RuleCatalog, settings: Settings) -> Self {
        Self {
            ledger: RelinkableHandle::new(ledger),
            matcher: EventMatcher::new(catalog),
            settings,
        }
    }

    /// Build from holiday feed text, parsed per `settings.feed_mode`.
    /// Lines skipped by a lenient load are returned alongside.
    pub fn from_feed(
        text: &str,
        catalog: RuleCatalog,
        settings: Settings,
    ) -> Result<(Self, Vec<Rejection>)> {
        let load = HolidayLedger::from_feed(text, settings.feed_mode)?;
        Ok((Self::new(load.ledger, catalog, settings), load.rejected))
    }

    /// Build from a holiday feed file.  See [`from_feed`](Self::from_feed).
    pub fn from_path(
        path: impl AsRef<Path>,
        catalog: RuleCatalog,
        settings: Settings,
    ) -> Result<(Self, Vec<Rejection>)> {
        let load = HolidayLedger::from_path(path, settings.feed_mode)?;
        Ok((Self::new(load.ledger, catalog, settings), load.rejected))
    }

    /// The settings in force.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The rule catalog.
    pub fn catalog(&self) -> &RuleCatalog {
        self.matcher.catalog()
    }

    /// A snapshot of the current ledger.
    pub fn ledger(&self) -> Arc<HolidayLedger> {
        self.ledger.current()
    }

    /// A clone of the ledger handle; relinking through it is seen here too.
    pub fn ledger_handle(&self) -> RelinkableHandle<HolidayLedger> {
        self.ledger.clone()
    }

    /// Swap in a new ledger.
    pub fn reload(&self, ledger: HolidayLedger) {
        tracing::info!(
            ledger = %ledger.name(),
            count = ledger.len(),
            "relinking holiday ledger"
        );
        self.ledger.link_to(ledger);
    }

    /// Parse feed text per the configured mode and swap it in.  On error
    /// the current ledger stays in place.
    pub fn reload_feed(&self, text: &str) -> Result<Vec<Rejection>> {
        let load = HolidayLedger::from_feed(text, self.settings.feed_mode)?;
        self.reload(load.ledger);
        Ok(load.rejected)
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// Whether `yyyymmdd` is a listed holiday.  Invalid dates are not.
    pub fn is_holiday(&self, yyyymmdd: u32) -> bool {
        self.ledger().is_holiday_ymd(yyyymmdd)
    }

    /// The holiday on `yyyymmdd`, if any.
    pub fn fetch(&self, yyyymmdd: u32) -> Option<Holiday> {
        self.ledger().fetch_ymd(yyyymmdd).cloned()
    }

    /// The first holiday after `yyyymmdd`, or the last one plus a year when
    /// nothing later is listed.  `None` for an empty ledger or an invalid
    /// date.
    pub fn next_holiday(&self, yyyymmdd: u32) -> Option<u32> {
        let date = Date::from_yyyymmdd(yyyymmdd).ok()?;
        self.ledger().next_holiday(date).map(|n| n.yyyymmdd())
    }

    /// Market days in `[start, end]` as `YYYYMMDD` strings.
    pub fn list_market_days(&self, start: &str, end: &str) -> Result<Vec<String>> {
        let ledger = self.ledger();
        let walker = DateWalker::from_yyyymmdd(&ledger, start, end)?
            .with_skip_weekends(self.settings.skip_weekends);
        Ok(walker.array())
    }

    /// The first market day after `yyyymmdd`.
    pub fn next_market_day(&self, yyyymmdd: u32) -> Result<u32> {
        let date = Date::from_yyyymmdd(yyyymmdd)?;
        next_market_day(&self.ledger(), date, self.settings.max_walk_steps).map(|d| d.yyyymmdd())
    }

    /// The last market day before `yyyymmdd`.
    pub fn prev_market_day(&self, yyyymmdd: u32) -> Result<u32> {
        let date = Date::from_yyyymmdd(yyyymmdd)?;
        prev_market_day(&self.ledger(), date, self.settings.max_walk_steps).map(|d| d.yyyymmdd())
    }

    /// Recurring events on `yyyymmdd`, in catalog order.
    pub fn events_for(&self, yyyymmdd: u32) -> Result<Vec<RecurringEvent>> {
        let date = Date::from_yyyymmdd(yyyymmdd)?;
        Ok(self
            .matcher
            .events_for_date(date)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Everything known about `yyyymmdd`, read from a single ledger snapshot.
    pub fn day_facts(&self, yyyymmdd: u32) -> Result<DayFacts> {
        let date = Date::from_yyyymmdd(yyyymmdd)?;
        let ledger = self.ledger();
        let next = ledger.next_holiday(date);
        Ok(DayFacts {
            date,
            holiday: ledger.fetch(date).map(|h| h.name().to_string()),
            next_holiday: next.map(|n| n.yyyymmdd()),
            next_holiday_estimated: next.is_some_and(|n| n.is_estimate()),
            is_market_day: ledger.is_market_day(date),
            events: self
                .matcher
                .events_for_date(date)
                .into_iter()
                .cloned()
                .collect(),
        })
    }

    /// [`day_facts`](Self::day_facts) for every day of a month.
    pub fn month_facts(&self, year: u16, month: u8) -> Result<Vec<DayFacts>> {
        let first = Date::from_ymd(year, month, 1)?;
        std::iter::successors(Some(first), |d| d.next_day())
            .take_while(|d| d.month() == month)
            .map(|d| self.day_facts(d.yyyymmdd()))
            .collect()
    }
}
