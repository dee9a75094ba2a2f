//! `Date` type.
//!
//! Dates are stored as a serial day count so that ordering, hashing, and
//! day arithmetic are plain integer operations.
//!
//! # Serial number convention
//! * Serial 1 = January 1, 1900.
//! * The valid date range is 1900-01-01 to 2199-12-31.
//!
//! At the crate boundary dates travel in the canonical `YYYYMMDD` form, either
//! as a `u32` (`20240227`) or as an eight-digit string (`"20240227"`).

use crate::weekday::Weekday;
use almanac_core::errors::{Error, Result};
use almanac_core::utilities::data_parsers::{parse_yyyymmdd, split_yyyymmdd};

/// A calendar date represented as a serial number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(i32);

/// Serial of 1970-01-01; converts between serials and days since the Unix epoch.
const UNIX_EPOCH_SERIAL: i32 = 25_568;

impl Date {
    /// Minimum valid date: January 1, 1900.
    pub const MIN: Date = Date(1);

    /// Maximum valid date: December 31, 2199.
    pub const MAX: Date = Date(109_573);

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from a serial number.
    pub fn from_serial(serial: i32) -> Result<Self> {
        let d = Date(serial);
        if d < Self::MIN || d > Self::MAX {
            return Err(Error::InvalidDate(format!(
                "serial {serial} outside [{}, {}]",
                Self::MIN.0,
                Self::MAX.0
            )));
        }
        Ok(d)
    }

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(1900..=2199).contains(&year) {
            return Err(Error::InvalidDate(format!(
                "year {year} out of range [1900, 2199]"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidDate(format!(
                "month {month} out of range [1, 12]"
            )));
        }
        let days_in = days_in_month(year, month);
        if day == 0 || day > days_in {
            return Err(Error::InvalidDate(format!(
                "day {day} out of range [1, {days_in}] for {year}-{month:02}"
            )));
        }
        Ok(Date(
            days_from_civil(year.into(), month.into(), day.into()) + UNIX_EPOCH_SERIAL,
        ))
    }

    /// Create a date from a `YYYYMMDD` integer such as `20240227`.
    pub fn from_yyyymmdd(n: u32) -> Result<Self> {
        let (y, m, d) = split_yyyymmdd(n)
            .ok_or_else(|| Error::InvalidDate(format!("{n} is not an 8-digit YYYYMMDD value")))?;
        Self::from_ymd(y, m, d)
    }

    /// Parse an eight-digit `YYYYMMDD` string, ignoring surrounding whitespace.
    pub fn parse_yyyymmdd(s: &str) -> Result<Self> {
        let (y, m, d) = parse_yyyymmdd(s)
            .ok_or_else(|| Error::InvalidDate(format!("{s:?} is not in YYYYMMDD form")))?;
        Self::from_ymd(y, m, d)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the serial number.
    pub fn serial(&self) -> i32 {
        self.0
    }

    /// Return `(year, month, day)`.
    pub fn ymd(&self) -> (u16, u8, u8) {
        let (y, m, d) = civil_from_days(self.0 - UNIX_EPOCH_SERIAL);
        // The range check in every constructor keeps these in bounds.
        (y as u16, m as u8, d as u8)
    }

    /// Return the year (1900–2199).
    pub fn year(&self) -> u16 {
        self.ymd().0
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u8 {
        self.ymd().1
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        self.ymd().2
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        weekday_from_days(self.0 - UNIX_EPOCH_SERIAL)
    }

    /// Return the canonical `YYYYMMDD` integer.
    pub fn yyyymmdd(&self) -> u32 {
        let (y, m, d) = self.ymd();
        u32::from(y) * 10_000 + u32::from(m) * 100 + u32::from(d)
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` calendar days.  Returns an error if the result is out
    /// of range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        let serial = self
            .0
            .checked_add(n)
            .ok_or_else(|| Error::InvalidDate(format!("{self} + {n} days overflows")))?;
        Self::from_serial(serial)
    }

    /// The following calendar day, or `None` at [`Date::MAX`].
    pub fn next_day(self) -> Option<Self> {
        (self < Self::MAX).then(|| Date(self.0 + 1))
    }

    /// The preceding calendar day, or `None` at [`Date::MIN`].
    pub fn previous_day(self) -> Option<Self> {
        (self > Self::MIN).then(|| Date(self.0 - 1))
    }

    /// Return the number of calendar days between `self` and `other`.
    /// Positive if `other > self`.
    pub fn days_between(self, other: Date) -> i32 {
        other.0 - self.0
    }

    /// Return the last day of the month containing this date.
    pub fn end_of_month(self) -> Self {
        let (y, m, d) = self.ymd();
        Date(self.0 + i32::from(days_in_month(y, m) - d))
    }

    /// Return `true` if this is the last calendar day of its month.
    pub fn is_end_of_month(self) -> bool {
        self == self.end_of_month()
    }

    /// Return the *n*-th occurrence of `weekday` in the month of `year`/`month`.
    ///
    /// For example, `nth_weekday(3, Weekday::Friday, 2024, 3)` returns the
    /// third Friday of March 2024 (2024-03-15).
    ///
    /// # Errors
    /// Returns an error if the month is out of range or if `n` is zero or
    /// larger than the number of such weekdays in the month.
    pub fn nth_weekday(n: u8, weekday: Weekday, year: u16, month: u8) -> Result<Self> {
        if n == 0 {
            return Err(Error::InvalidDate("nth_weekday: n must be >= 1".into()));
        }
        let first = Date::from_ymd(year, month, 1)?;
        let skip = (i32::from(weekday.ordinal()) - i32::from(first.weekday().ordinal()))
            .rem_euclid(7);
        let day = 1 + skip + 7 * (i32::from(n) - 1);
        if day > i32::from(days_in_month(year, month)) {
            return Err(Error::InvalidDate(format!(
                "nth_weekday: {} {weekday} does not exist in {year}-{month:02}",
                almanac_core::utilities::data_formatters::format_ordinal(n.into())
            )));
        }
        first.add_days(day - 1)
    }
}

// ── Operators / traits ────────────────────────────────────────────────────────

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

impl std::str::FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Date::parse_yyyymmdd(s)
    }
}

impl TryFrom<u32> for Date {
    type Error = Error;

    fn try_from(n: u32) -> Result<Self> {
        Date::from_yyyymmdd(n)
    }
}

impl From<Date> for u32 {
    fn from(d: Date) -> u32 {
        d.yyyymmdd()
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "{y:04}{m:02}{d:02}")
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "Date({y:04}-{m:02}-{d:02})")
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Date {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.yyyymmdd())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let n = u32::deserialize(deserializer)?;
        Date::from_yyyymmdd(n).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "chrono")]
impl From<Date> for chrono::NaiveDate {
    fn from(d: Date) -> chrono::NaiveDate {
        // NaiveDate::default() is 1970-01-01; every Date offset from it stays in chrono's range.
        chrono::NaiveDate::default() + chrono::Duration::days(i64::from(d.0 - UNIX_EPOCH_SERIAL))
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<chrono::NaiveDate> for Date {
    type Error = Error;

    fn try_from(nd: chrono::NaiveDate) -> Result<Self> {
        use chrono::Datelike;
        let year = u16::try_from(nd.year())
            .map_err(|_| Error::InvalidDate(format!("year {} out of range", nd.year())))?;
        // month() and day() are bounded by 12 and 31.
        Date::from_ymd(year, nd.month() as u8, nd.day() as u8)
    }
}

// ── Calendar arithmetic ───────────────────────────────────────────────────────

/// Whether a given year is a leap year.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given month/year; 0 for a month outside 1–12.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Weekday of an arbitrary proleptic-Gregorian `(year, month, day)`.
///
/// No range check is applied, which lets rule evaluation probe the weekday
/// of any day-of-month in any year.
pub fn weekday_of(year: u16, month: u8, day: u8) -> Weekday {
    weekday_from_days(days_from_civil(year.into(), month.into(), day.into()))
}

/// Days since 1970-01-01 for a proleptic-Gregorian date.
fn days_from_civil(y: i32, m: i32, d: i32) -> i32 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (m + 9) % 12;
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`].
fn civil_from_days(z: i32) -> (i32, i32, i32) {
    let z = z + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = yoe + era * 400 + i32::from(m <= 2);
    (y, m, d)
}

fn weekday_from_days(days: i32) -> Weekday {
    // 1970-01-01 was a Thursday (ordinal 4).
    Weekday::from_index0((days + 3).rem_euclid(7))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        let d = Date::from_ymd(1900, 1, 1).unwrap();
        assert_eq!(d.serial(), 1);
        assert_eq!(d, Date::MIN);
        assert_eq!(Date::from_ymd(2199, 12, 31).unwrap(), Date::MAX);
        assert_eq!(Date::from_ymd(1970, 1, 1).unwrap().serial(), UNIX_EPOCH_SERIAL);
    }

    #[test]
    fn test_roundtrip() {
        let dates = [
            (1900, 1, 1),
            (1900, 12, 31),
            (2000, 2, 29), // leap
            (2100, 2, 28), // non-leap century
            (2024, 2, 29),
            (2023, 6, 15),
            (2199, 12, 31),
        ];
        for (y, m, d) in dates {
            let date = Date::from_ymd(y, m, d).unwrap();
            assert_eq!(date.ymd(), (y, m, d), "mismatch for {y}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn test_invalid() {
        assert!(Date::from_ymd(2023, 2, 29).is_err());
        assert!(Date::from_ymd(2024, 13, 1).is_err());
        assert!(Date::from_ymd(2024, 4, 31).is_err());
        assert!(Date::from_ymd(1899, 12, 31).is_err());
        assert!(Date::from_serial(0).is_err());
        assert!(matches!(
            Date::from_yyyymmdd(2024011),
            Err(Error::InvalidDate(_))
        ));
        assert!(Date::parse_yyyymmdd("2024-01-01").is_err());
    }

    #[test]
    fn test_weekday() {
        assert_eq!(Date::from_ymd(2024, 1, 1).unwrap().weekday(), Weekday::Monday);
        assert_eq!(Date::from_ymd(2024, 1, 6).unwrap().weekday(), Weekday::Saturday);
        assert_eq!(Date::from_ymd(1959, 2, 7).unwrap().weekday(), Weekday::Saturday);
        assert_eq!(Date::MIN.weekday(), Weekday::Monday);
        assert_eq!(weekday_of(2024, 5, 19), Weekday::Sunday);
    }

    #[test]
    fn test_yyyymmdd() {
        let d = Date::from_yyyymmdd(20240227).unwrap();
        assert_eq!(d.ymd(), (2024, 2, 27));
        assert_eq!(d.yyyymmdd(), 20240227);
        assert_eq!(d.to_string(), "20240227");
        assert_eq!(format!("{d:?}"), "Date(2024-02-27)");
        assert_eq!("20240227".parse::<Date>().unwrap(), d);
    }

    #[test]
    fn test_steps() {
        let d = Date::from_ymd(2024, 2, 28).unwrap();
        assert_eq!(d.next_day().unwrap().ymd(), (2024, 2, 29));
        assert_eq!(d.add_days(2).unwrap().ymd(), (2024, 3, 1));
        assert_eq!(Date::MAX.next_day(), None);
        assert_eq!(Date::MIN.previous_day(), None);
        assert!(Date::MAX.add_days(1).is_err());
        assert_eq!(Date::from_ymd(2023, 2, 1).unwrap() - Date::from_ymd(2023, 1, 1).unwrap(), 31);
    }

    #[test]
    fn test_end_of_month() {
        let d = Date::from_ymd(2024, 2, 15).unwrap();
        assert_eq!(d.end_of_month().day_of_month(), 29);
        assert!(Date::from_ymd(2023, 12, 31).unwrap().is_end_of_month());
        assert!(!d.is_end_of_month());
    }

    #[test]
    fn test_nth_weekday() {
        let d = Date::nth_weekday(3, Weekday::Friday, 2024, 3).unwrap();
        assert_eq!(d, Date::from_ymd(2024, 3, 15).unwrap());
        let d2 = Date::nth_weekday(1, Weekday::Monday, 2024, 1).unwrap();
        assert_eq!(d2, Date::from_ymd(2024, 1, 1).unwrap());
        let d3 = Date::nth_weekday(5, Weekday::Monday, 2024, 1).unwrap();
        assert_eq!(d3, Date::from_ymd(2024, 1, 29).unwrap());
        assert!(Date::nth_weekday(5, Weekday::Wednesday, 2024, 2).is_err());
        assert!(Date::nth_weekday(0, Weekday::Monday, 2024, 1).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_uses_yyyymmdd() {
        let d = Date::from_ymd(2024, 2, 27).unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), "20240227");
        assert_eq!(serde_json::from_str::<Date>("20240227").unwrap(), d);
        assert!(serde_json::from_str::<Date>("20240230").is_err());
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn test_chrono_round_trip() {
        let d = Date::from_ymd(2024, 2, 29).unwrap();
        let nd: chrono::NaiveDate = d.into();
        assert_eq!(nd, chrono::NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(Date::try_from(nd).unwrap(), d);
        assert!(Date::try_from(chrono::NaiveDate::from_ymd_opt(2200, 1, 1).unwrap()).is_err());
    }
}
