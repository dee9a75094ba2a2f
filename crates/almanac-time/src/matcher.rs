//! `EventMatcher` — which recurring events fall on a given date.

use crate::catalog::RuleCatalog;
use crate::date::Date;
use crate::recurring::RecurringEvent;
use almanac_core::errors::Result;

/// Evaluates every rule of a catalog against a date.
#[derive(Debug, Clone)]
pub struct EventMatcher {
    catalog: RuleCatalog,
}

impl EventMatcher {
    /// A matcher over `catalog`.
    pub fn new(catalog: RuleCatalog) -> Self {
        Self { catalog }
    }

    /// The catalog being matched.
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Rules firing on `year`-`month`-`day` (month 1-based), in catalog order.
    /// A date that does not exist has no events.
    pub fn events_for(&self, year: u16, month: u8, day: u8) -> Vec<&RecurringEvent> {
        self.catalog
            .iter()
            .filter(|e| e.occurs_on(year, month, day))
            .collect()
    }

    /// [`events_for`](Self::events_for) for a [`Date`].
    pub fn events_for_date(&self, date: Date) -> Vec<&RecurringEvent> {
        let (y, m, d) = date.ymd();
        self.events_for(y, m, d)
    }

    /// [`events_for`](Self::events_for) for a `YYYYMMDD` string.
    ///
    /// # Errors
    /// [`Error::InvalidDate`](almanac_core::errors::Error::InvalidDate) if
    /// the string is not a valid date.
    pub fn events_for_yyyymmdd(&self, yyyymmdd: &str) -> Result<Vec<&RecurringEvent>> {
        Ok(self.events_for_date(Date::parse_yyyymmdd(yyyymmdd)?))
    }

    /// For each day of the month, the rules firing on it.  Days without
    /// events are left out.
    pub fn month_view(&self, year: u16, month: u8) -> Vec<(Date, Vec<&RecurringEvent>)> {
        (1..=crate::date::days_in_month(year, month))
            .filter_map(|d| Date::from_ymd(year, month, d).ok())
            .map(|date| (date, self.events_for_date(date)))
            .filter(|(_, events)| !events.is_empty())
            .collect()
    }
}

impl Default for EventMatcher {
    fn default() -> Self {
        Self::new(RuleCatalog::builtin())
    }
}
