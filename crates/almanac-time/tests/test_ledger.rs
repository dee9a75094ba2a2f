//! Holiday ledger and feed-loading tests.

use almanac_core::{Error, FeedMode};
use almanac_time::{Date, Holiday, HolidayLedger, NextHoliday, TradingCalendar};
use proptest::prelude::*;

fn date(n: u32) -> Date {
    Date::from_yyyymmdd(n).unwrap()
}

const NYSE_2024: &str = "\
# NYSE closures, 2024
20240101,New Year's Day
20240115,Martin Luther King, Jr. Day
20240219,Washington's Birthday
20240329,Good Friday
20240527,Memorial Day
20240619,Juneteenth National Independence Day
20240704,Independence Day
20240902,Labor Day
20241128,Thanksgiving Day
20241225,Christmas Day
";

fn nyse() -> HolidayLedger {
    HolidayLedger::from_feed(NYSE_2024, FeedMode::Strict)
        .unwrap()
        .into_ledger()
        .with_name("NYSE")
}

// ─── Concrete scenarios ──────────────────────────────────────────────────────

#[test]
fn new_year_only() {
    let l = HolidayLedger::new([Holiday::new(date(20240101), "New Year")]).unwrap();
    assert!(l.is_holiday_ymd(20240101));
    assert_eq!(l.next_holiday(date(20231225)).unwrap().yyyymmdd(), 20240101);
    assert_eq!(
        l.next_holiday(date(20240101)),
        Some(NextHoliday::Estimated(20250101))
    );
}

#[test]
fn nyse_lookups() {
    let l = nyse();
    assert_eq!(l.len(), 10);
    assert_eq!(
        l.fetch_ymd(20240115).map(Holiday::name),
        Some("Martin Luther King, Jr. Day")
    );
    assert!(!l.is_holiday(date(20240116)));

    let next = l.next_holiday(date(20240620)).unwrap();
    assert_eq!(next.holiday().map(Holiday::name), Some("Independence Day"));
    assert_eq!(
        l.next_holiday(date(20241225)).unwrap(),
        NextHoliday::Estimated(20251225)
    );
    assert_eq!(l.between(date(20240501), date(20240731)).len(), 3);
}

#[test]
fn ledger_as_trading_calendar() {
    let l = nyse();
    let cal: &dyn TradingCalendar = &l;
    assert_eq!(cal.name(), "NYSE");
    assert!(!cal.is_market_day(date(20240704)));
    // Good Friday, then a weekend, then open again on Monday.
    let open: Vec<bool> = [20240328, 20240329, 20240330, 20240331, 20240401]
        .into_iter()
        .map(|n| cal.is_market_day(date(n)))
        .collect();
    assert_eq!(open, [true, false, false, false, true]);
    assert!(cal.is_weekend(date(20240330)));
}

#[test]
fn feed_text_survives_reload() {
    let l = nyse();
    let again = HolidayLedger::from_feed(&l.to_feed(), FeedMode::Strict)
        .unwrap()
        .into_ledger()
        .with_name("NYSE");
    assert_eq!(again, l);
}

#[test]
fn lenient_feed_reports_every_bad_line() {
    let feed = format!("{NYSE_2024}2024,broken\n20240101,New Year again\n20241301,Smarch\n");
    let load = HolidayLedger::from_feed(&feed, FeedMode::Lenient).unwrap();
    assert_eq!(load.ledger.len(), 10);
    let lines: Vec<usize> = load.rejected.iter().map(|r| r.line).collect();
    assert_eq!(lines, vec![12, 13, 14]);
    assert_eq!(
        load.ledger.fetch_ymd(20240101).map(Holiday::name),
        Some("New Year's Day")
    );
}

#[test]
fn strict_feed_aborts() {
    let feed = format!("{NYSE_2024}20241301,Smarch\n");
    assert!(matches!(
        HolidayLedger::from_feed(&feed, FeedMode::Strict),
        Err(Error::MalformedEntry { line: 12, .. })
    ));
}

// ─── Properties ──────────────────────────────────────────────────────────────

fn serial_set() -> impl Strategy<Value = Vec<i32>> {
    // Roughly 2000 through 2030.
    proptest::collection::btree_set(36_525i32..47_847, 0..60)
        .prop_map(|s| s.into_iter().collect())
}

fn ledger_from(serials: &[i32]) -> HolidayLedger {
    HolidayLedger::new(
        serials
            .iter()
            .map(|s| Holiday::new(Date::from_serial(*s).unwrap(), format!("h{s}"))),
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn every_listed_holiday_is_found(serials in serial_set()) {
        let l = ledger_from(&serials);
        for s in &serials {
            let d = Date::from_serial(*s).unwrap();
            let name = format!("h{s}");
            prop_assert!(l.is_holiday(d));
            prop_assert_eq!(l.fetch(d).map(Holiday::name), Some(name.as_str()));
        }
    }

    #[test]
    fn unlisted_days_are_not_holidays(serials in serial_set(), probe in 36_525i32..47_847) {
        let l = ledger_from(&serials);
        let d = Date::from_serial(probe).unwrap();
        prop_assert_eq!(l.is_holiday(d), serials.contains(&probe));
    }

    #[test]
    fn next_holiday_is_the_least_later_entry(serials in serial_set(), probe in 36_525i32..47_847) {
        let l = ledger_from(&serials);
        let d = Date::from_serial(probe).unwrap();
        match l.next_holiday(d) {
            None => prop_assert!(serials.is_empty()),
            Some(NextHoliday::Listed(h)) => {
                prop_assert!(h.date() > d);
                let expected = serials.iter().copied().filter(|s| *s > probe).min();
                prop_assert_eq!(Some(h.date().serial()), expected);
            }
            Some(NextHoliday::Estimated(n)) => {
                let last = serials.iter().copied().max().unwrap();
                prop_assert!(last <= probe);
                prop_assert_eq!(n, Date::from_serial(last).unwrap().yyyymmdd() + 10_000);
            }
        }
    }
}
