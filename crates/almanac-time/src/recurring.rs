//! Recurring events — monthly and weekly rules such as "last Tuesday" or
//! "3rd business day".
//!
//! A rule pairs a signed [`Ordinal`] with a [`DaySpecifier`].  Zero means
//! every occurrence; positive ordinals count from the start of the month and
//! negative ones from its end.
//!
//! | specifier     | ordinal        | fires on                                   |
//! |---------------|----------------|--------------------------------------------|
//! | `DayOfMonth`  | `n > 0`        | day `n`                                    |
//! | `DayOfMonth`  | `n < 0`        | the `-n`-th last day                       |
//! | `BusinessDay` | `n > 0`        | the `n`-th Monday–Friday of the month      |
//! | `OnOrAbout`   | `1..=31`       | day `n`, or the Fri–Mon span around it     |
//! | `Weekday(w)`  | `0`            | every `w`                                  |
//! | `Weekday(w)`  | `n > 0`/`n < 0`| the `n`-th / `-n`-th last `w` of the month |
//!
//! An on-or-about target past the end of a short month is pulled back to the
//! month's last day.  Every other rule that points past the month simply does
//! not fire that month.

use crate::date::{days_in_month, weekday_of, Date};
use crate::weekday::Weekday;
use almanac_core::ensure_entry;
use almanac_core::errors::{Error, Result};
use almanac_core::utilities::data_formatters::format_signed_ordinal;
use almanac_core::utilities::data_parsers::split_record;

/// What an ordinal counts against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DaySpecifier {
    /// A particular day of the week.
    Weekday(Weekday),
    /// A calendar day of the month.
    DayOfMonth,
    /// A calendar day of the month, widened to the surrounding Friday–Monday
    /// when it falls on a weekend.
    OnOrAbout,
    /// A Monday–Friday day of the month; holidays are not consulted.
    BusinessDay,
}

impl DaySpecifier {
    /// Classify a record's day code.
    ///
    /// A leading `O` means on-or-about and a leading `B` means business day
    /// (any case).  Otherwise the first two letters are tried as a weekday;
    /// a code that is none of these counts calendar days.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        let first = code.chars().next()?;
        Some(match first.to_ascii_uppercase() {
            'O' => DaySpecifier::OnOrAbout,
            'B' => DaySpecifier::BusinessDay,
            _ => Weekday::from_prefix(code).map_or(DaySpecifier::DayOfMonth, DaySpecifier::Weekday),
        })
    }

    /// The canonical record code (`TUE`, `DOM`, `OOA`, `BIZ`).
    pub fn code(&self) -> &'static str {
        match self {
            DaySpecifier::Weekday(w) => w.short_name(),
            DaySpecifier::DayOfMonth => "DOM",
            DaySpecifier::OnOrAbout => "OOA",
            DaySpecifier::BusinessDay => "BIZ",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DaySpecifier::Weekday(w) => w.name(),
            DaySpecifier::DayOfMonth => "day",
            DaySpecifier::OnOrAbout => "OOA",
            DaySpecifier::BusinessDay => "biz day",
        }
    }
}

impl std::fmt::Display for DaySpecifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A signed occurrence count: `0` is every, `-1` is last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ordinal(pub i32);

impl Ordinal {
    /// Every occurrence.
    pub const EVERY: Ordinal = Ordinal(0);
    /// The last occurrence in the month.
    pub const LAST: Ordinal = Ordinal(-1);

    /// The raw signed value.
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for Ordinal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_signed_ordinal(self.0))
    }
}

/// An event that recurs on a monthly or weekly pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringEvent {
    ordinal: Ordinal,
    day: DaySpecifier,
    description: String,
}

impl RecurringEvent {
    /// Create a rule, rejecting ordinals the specifier cannot count with.
    ///
    /// # Errors
    /// [`Error::UnsupportedOrdinal`] for a business-day ordinal below 1, an
    /// on-or-about day outside `1..=31`, or a day-of-month ordinal of 0.
    pub fn new(ordinal: i32, day: DaySpecifier, description: impl Into<String>) -> Result<Self> {
        let supported = match day {
            DaySpecifier::BusinessDay => ordinal > 0,
            DaySpecifier::OnOrAbout => (1..=31).contains(&ordinal),
            DaySpecifier::DayOfMonth => ordinal != 0,
            DaySpecifier::Weekday(_) => true,
        };
        if !supported {
            return Err(Error::UnsupportedOrdinal {
                ordinal,
                specifier: day.code().to_string(),
            });
        }
        Ok(Self::from_parts(Ordinal(ordinal), day, description.into()))
    }

    /// Build from parts already known to be valid.
    pub(crate) fn from_parts(ordinal: Ordinal, day: DaySpecifier, description: String) -> Self {
        Self {
            ordinal,
            day,
            description,
        }
    }

    /// Parse an `ordinal, day-code, description` record.
    ///
    /// ```
    /// use almanac_time::{DaySpecifier, RecurringEvent, Weekday};
    ///
    /// let e = RecurringEvent::parse("-1, TUE, Case-Shiller Home Price Index").unwrap();
    /// assert_eq!(e.day(), DaySpecifier::Weekday(Weekday::Tuesday));
    /// assert!(e.occurs_on(2024, 2, 27));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        Self::parse_line(0, s)
    }

    /// Parse a record, attributing format errors to `line`.
    pub(crate) fn parse_line(line: usize, s: &str) -> Result<Self> {
        let fields = split_record(s, 3);
        ensure_entry!(
            fields.len() == 3,
            line,
            "expected `ordinal, day, description`, got {s:?}"
        );
        let ordinal: i32 = fields[0].parse().map_err(|_| Error::MalformedEntry {
            line,
            reason: format!("ordinal {:?} is not an integer", fields[0]),
        })?;
        let day = DaySpecifier::from_code(fields[1]).ok_or_else(|| Error::MalformedEntry {
            line,
            reason: "empty day code".to_string(),
        })?;
        ensure_entry!(!fields[2].is_empty(), line, "event has no description");
        Self::new(ordinal, day, fields[2])
    }

    /// Which occurrence the rule selects.
    pub fn ordinal(&self) -> Ordinal {
        self.ordinal
    }

    /// What the ordinal counts.
    pub fn day(&self) -> DaySpecifier {
        self.day
    }

    /// Free-text description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The rule in record form, e.g. `-1, TUE, Case-Shiller Home Price Index`.
    pub fn to_record(&self) -> String {
        format!("{}, {}, {}", self.ordinal.0, self.day.code(), self.description)
    }

    /// Whether the rule fires on `year`-`month`-`day` (month 1-based).
    /// A date that does not exist never matches.
    pub fn occurs_on(&self, year: u16, month: u8, day: u8) -> bool {
        let last = days_in_month(year, month);
        if day == 0 || day > last {
            return false;
        }
        let n = self.ordinal.0;
        let dom = i32::from(day);
        match self.day {
            DaySpecifier::DayOfMonth if n > 0 => dom == n,
            DaySpecifier::DayOfMonth => dom == i32::from(last) + 1 + n,
            DaySpecifier::BusinessDay => nth_business_day(year, month, n) == Some(day),
            DaySpecifier::OnOrAbout => {
                let target = u8::try_from(n).map_or(last, |t| t.min(last));
                let t = i32::from(target);
                match weekday_of(year, month, target) {
                    Weekday::Saturday => (t - 1..=t + 2).contains(&dom),
                    Weekday::Sunday => (t - 2..=t + 1).contains(&dom),
                    _ => dom == t,
                }
            }
            DaySpecifier::Weekday(w) => {
                if weekday_of(year, month, day) != w {
                    return false;
                }
                match n {
                    0 => true,
                    n if n > 0 => i32::from((day - 1) / 7 + 1) == n,
                    n => -i32::from((last - day) / 7 + 1) == n,
                }
            }
        }
    }

    /// [`occurs_on`](Self::occurs_on) for a [`Date`].
    pub fn occurs_on_date(&self, date: Date) -> bool {
        let (y, m, d) = date.ymd();
        self.occurs_on(y, m, d)
    }

    /// Every date in the month on which the rule fires.
    pub fn dates_in_month(&self, year: u16, month: u8) -> Vec<Date> {
        (1..=days_in_month(year, month))
            .filter(|d| self.occurs_on(year, month, *d))
            .filter_map(|d| Date::from_ymd(year, month, d).ok())
            .collect()
    }
}

impl std::fmt::Display for RecurringEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}  ({} {})",
            self.description,
            self.ordinal,
            self.day.label()
        )
    }
}

/// Day of the month of the `n`-th Monday–Friday, if the month has that many.
fn nth_business_day(year: u16, month: u8, n: i32) -> Option<u8> {
    let n = usize::try_from(n).ok()?.checked_sub(1)?;
    (1..=days_in_month(year, month))
        .filter(|d| weekday_of(year, month, *d).is_weekday())
        .nth(n)
}
