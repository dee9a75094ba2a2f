//! `RuleCatalog` — an ordered list of recurring-event rules.
//!
//! The built-in catalog covers the usual US economic releases plus a few
//! personal routines.  More rules can be read from text, one
//! `ordinal, day-code, description` record per line.

use crate::recurring::{DaySpecifier, Ordinal, RecurringEvent};
use almanac_core::errors::Result;
use almanac_core::utilities::data_parsers::is_blank_or_comment;

use crate::recurring::DaySpecifier::{BusinessDay as Biz, DayOfMonth as Dom, OnOrAbout as Ooa};
use crate::weekday::Weekday::{Friday, Saturday, Sunday, Tuesday};

const BUILTIN: &[(i32, DaySpecifier, &str)] = &[
    (0, DaySpecifier::Weekday(Saturday), "Update Goals & Vision"),
    (0, DaySpecifier::Weekday(Sunday), "Weekly Trading Plan"),
    (0, DaySpecifier::Weekday(Sunday), "Do Backups"),
    (7, Dom, "Lucky Seven"),
    (-1, Dom, "Last Day of Month"),
    (-2, Dom, "Second Last Day of Month"),
    (-1, DaySpecifier::Weekday(Tuesday), "Case-Shiller Home Price Index"),
    (-1, DaySpecifier::Weekday(Tuesday), "CCI: Consumer Confidence Index"),
    (0, DaySpecifier::Weekday(Tuesday), "Turnaround Tuesday"),
    (0, DaySpecifier::Weekday(Tuesday), "Oil Inventories"),
    (0, DaySpecifier::Weekday(Tuesday), "Jobless Claims Report"),
    (0, DaySpecifier::Weekday(Tuesday), "Money Supply"),
    (1, DaySpecifier::Weekday(Tuesday), "Same store sales"),
    (3, DaySpecifier::Weekday(Tuesday), "Business Outlook Survey"),
    (1, DaySpecifier::Weekday(Friday), "Labor Report: Employee Situation Report"),
    (-3, DaySpecifier::Weekday(Friday), "10:00 Reuters Surveys of Consumers Prelim"),
    (3, DaySpecifier::Weekday(Friday), "Options Expiration"),
    (-1, DaySpecifier::Weekday(Friday), "10:00 Reuters Surveys of Consumers Final"),
    (9, Ooa, "Wholesale Trade Report"),
    (13, Ooa, "Retail Sales Report"),
    (15, Ooa, "CPI: Consumer Price Index"),
    (16, Ooa, "Industrial Production"),
    (17, Ooa, "Housing Starts"),
    (19, Ooa, "Trade Balance Report"),
    (20, Ooa, "Durable Goods Report"),
    (1, Biz, "PMI: Purchasing Managers Index"),
    (1, Biz, "Auto sales"),
    (3, Biz, "ISM Non-Manufacturing Report"),
    (5, Biz, "Wholesale Inventories"),
];

/// An ordered collection of rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleCatalog {
    events: Vec<RecurringEvent>,
}

impl RuleCatalog {
    /// A catalog holding `events` in the given order.
    pub fn new(events: Vec<RecurringEvent>) -> Self {
        Self { events }
    }

    /// The built-in catalog.
    pub fn builtin() -> Self {
        let events = BUILTIN
            .iter()
            .map(|(n, day, desc)| RecurringEvent::from_parts(Ordinal(*n), *day, (*desc).to_string()))
            .collect();
        Self { events }
    }

    /// Parse a catalog from text, one record per line.  Blank lines and
    /// `#` comments are skipped.
    ///
    /// # Errors
    /// The first bad record, with its 1-based line number for format errors.
    pub fn parse(text: &str) -> Result<Self> {
        let events = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !is_blank_or_comment(line))
            .map(|(i, line)| RecurringEvent::parse_line(i + 1, line))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(rules = events.len(), "rule catalog parsed");
        Ok(Self { events })
    }

    /// Append rules after the existing ones.
    pub fn extend(&mut self, events: impl IntoIterator<Item = RecurringEvent>) {
        self.events.extend(events);
    }

    /// Rules in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, RecurringEvent> {
        self.events.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the catalog has no rules.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The catalog in record form, one rule per line.
    pub fn to_records(&self) -> String {
        self.events
            .iter()
            .map(|e| format!("{}\n", e.to_record()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a RuleCatalog {
    type Item = &'a RecurringEvent;
    type IntoIter = std::slice::Iter<'a, RecurringEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<RecurringEvent> for RuleCatalog {
    fn from_iter<I: IntoIterator<Item = RecurringEvent>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use almanac_core::errors::Error;

    #[test]
    fn builtin_rules_are_valid() {
        let cat = RuleCatalog::builtin();
        assert_eq!(cat.len(), 29);
        for e in &cat {
            let again = RecurringEvent::new(e.ordinal().value(), e.day(), e.description()).unwrap();
            assert_eq!(&again, e);
        }
    }

    #[test]
    fn builtin_survives_record_text() {
        let cat = RuleCatalog::builtin();
        assert_eq!(RuleCatalog::parse(&cat.to_records()).unwrap(), cat);
    }

    #[test]
    fn parse_skips_comments_and_reports_lines() {
        let text = "# weekly\n 0, WED, Oil Inventories\n\n-1, TUE, Case-Shiller\n";
        let cat = RuleCatalog::parse(text).unwrap();
        assert_eq!(cat.len(), 2);
        assert_eq!(cat.iter().next().unwrap().description(), "Oil Inventories");

        let e = RuleCatalog::parse("0, WED, ok\n\nbroken\n").unwrap_err();
        assert!(matches!(e, Error::MalformedEntry { line: 3, .. }));
    }

    #[test]
    fn extend_keeps_order() {
        let mut cat = RuleCatalog::parse("1, BIZ, PMI").unwrap();
        cat.extend(RuleCatalog::parse("2, MON, Second Monday").unwrap().iter().cloned());
        let names: Vec<&str> = cat.iter().map(RecurringEvent::description).collect();
        assert_eq!(names, ["PMI", "Second Monday"]);
    }
}
