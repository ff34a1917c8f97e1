use hstfocus_core::{CalendarInstant, calendar_to_mjd, mjd_to_calendar};
use proptest::prelude::*;

const ONE_SECOND: f64 = 1.0 / 86_400.0;

/// Valid calendar dates after 1 AD, days capped at 28 so every (year, month)
/// combination is legal, and the ten days deleted by the 1582 reform skipped.
fn arb_calendar() -> impl Strategy<Value = CalendarInstant> {
    (
        1i32..3000,
        1u32..=12,
        1u32..=28,
        0u32..24,
        0u32..60,
        0u32..60,
    )
        .prop_filter_map(
            "dates deleted by the Gregorian reform",
            |(year, month, day, hour, minute, second)| {
                if year == 1582 && month == 10 && (5..15).contains(&day) {
                    None
                } else {
                    Some(CalendarInstant::new(year, month, day, hour, minute, second))
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn calendar_round_trips_within_one_second(c in arb_calendar()) {
        let mjd = calendar_to_mjd(&c);
        let back = mjd_to_calendar(mjd);
        // Truncation of the day fraction may lose up to one second.
        let drift = (calendar_to_mjd(&back) - mjd).abs();
        prop_assert!(drift <= ONE_SECOND * 1.01, "{c} -> {mjd} -> {back}");
        prop_assert_eq!((back.year, back.month, back.day), (c.year, c.month, c.day));
    }

    #[test]
    fn mjd_round_trips_within_one_second(mjd in 15_020.0f64..80_000.0) {
        let back = calendar_to_mjd(&mjd_to_calendar(mjd));
        prop_assert!((back - mjd).abs() <= ONE_SECOND * 1.01, "{} -> {}", mjd, back);
    }

    #[test]
    fn calendar_order_follows_mjd_order(a in 15_020.0f64..80_000.0, b in 15_020.0f64..80_000.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        // CalendarInstant's derived ordering is calendar ordering.
        prop_assert!(mjd_to_calendar(lo) <= mjd_to_calendar(hi));
    }
}

#[test]
fn agrees_with_chrono_on_dates() {
    use chrono::{Datelike, Days, NaiveDate};

    // MJD 0 is 1858 Nov 17; walk forward in large steps and compare the
    // date decomposition at noon (exact half-day fraction) with chrono.
    let epoch = NaiveDate::from_ymd_opt(1858, 11, 17).unwrap();
    for day in (0..120_000u64).step_by(97) {
        let expected = epoch.checked_add_days(Days::new(day)).unwrap();
        #[allow(clippy::cast_precision_loss)]
        let got = mjd_to_calendar(day as f64 + 0.5);
        assert_eq!(
            (got.year, got.month, got.day, got.hour),
            (expected.year(), expected.month(), expected.day(), 12),
            "mjd {day}.5"
        );
    }
}

#[test]
fn agrees_with_chrono_on_mjd_values() {
    use chrono::{Datelike, NaiveDate};

    for (y, m, d) in [(1859, 1, 1), (1900, 3, 1), (1999, 12, 31), (2004, 2, 29), (2100, 2, 28)] {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let days_since_epoch = date
            .signed_duration_since(NaiveDate::from_ymd_opt(1858, 11, 17).unwrap())
            .num_days();
        let c = CalendarInstant::new(date.year(), date.month(), date.day(), 0, 0, 0);
        #[allow(clippy::cast_precision_loss)]
        let expected = days_since_epoch as f64;
        assert!(
            (calendar_to_mjd(&c) - expected).abs() < 1e-9,
            "{y}-{m}-{d}"
        );
    }
}
