use almanac_core::FeedMode;
use almanac_time::{
    next_market_day, Date, DateWalker, EventMatcher, HolidayLedger, RecurringEvent,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Roughly a decade of US exchange closures, one line per holiday.
fn build_feed() -> String {
    let mut feed = String::new();
    for year in 2015..2025 {
        for (mmdd, name) in [
            (101, "New Year's Day"),
            (704, "Independence Day"),
            (1225, "Christmas Day"),
        ] {
            let d = Date::from_yyyymmdd(year * 10_000 + mmdd).unwrap();
            if d.weekday().is_weekday() {
                feed.push_str(&format!("{d},{name}\n"));
            }
        }
    }
    feed
}

fn bench_walker(c: &mut Criterion) {
    let ledger = HolidayLedger::from_feed(&build_feed(), FeedMode::Strict)
        .unwrap()
        .into_ledger();
    let start = Date::from_yyyymmdd(20150101).unwrap();
    let end = Date::from_yyyymmdd(20241231).unwrap();

    c.bench_function("market_days_10y", |b| {
        b.iter(|| DateWalker::new(&ledger, black_box(start), black_box(end)).size())
    });

    c.bench_function("next_market_day", |b| {
        let d = Date::from_yyyymmdd(20231222).unwrap();
        b.iter(|| next_market_day(&ledger, black_box(d), 30).unwrap())
    });

    c.bench_function("is_holiday", |b| {
        let d = Date::from_yyyymmdd(20200704).unwrap();
        b.iter(|| ledger.is_holiday(black_box(d)))
    });
}

fn bench_matcher(c: &mut Criterion) {
    let matcher = EventMatcher::default();
    let year = Date::from_yyyymmdd(20240101).unwrap();

    c.bench_function("events_for_year", |b| {
        b.iter(|| {
            let mut hits = 0;
            let mut d = Some(year);
            while let Some(day) = d.filter(|d| d.year() == 2024) {
                hits += matcher.events_for_date(black_box(day)).len();
                d = day.next_day();
            }
            hits
        })
    });

    let rule = RecurringEvent::parse("5, BIZ, Wholesale Inventories").unwrap();
    c.bench_function("business_day_rule", |b| {
        b.iter(|| rule.occurs_on(black_box(2024), black_box(6), black_box(7)))
    });
}

criterion_group!(benches, bench_walker, bench_matcher);
criterion_main!(benches);
