//! Integration tests for the tick/date bijection and the display layer.
//!
//! The exhaustive round trip walks ten million ticks; the reverse direction
//! is property-tested over the whole valid date space.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use proptest::prelude::*;
use simclock_core::CalendarError;
use simclock_core::calendar::{
    TICKS_PER_DAY, TICKS_PER_YEAR, date_from_tick, day_of, month_of, start_of_day, tick_from_date,
    tick_from_raw,
};
use simclock_core::format::{compact, verbose};
use simclock_types::CalendarDate;

const fn date(year: u64, week: u8, day: u8, quarter_tick: u8) -> CalendarDate {
    CalendarDate {
        year,
        week,
        day,
        quarter_tick,
    }
}

#[test]
fn every_tick_up_to_ten_million_round_trips() {
    for tick in 0..=10_000_000_u64 {
        let d = date_from_tick(tick);
        assert_eq!(tick_from_date(&d), Ok(tick), "tick {tick} -> {d:?}");
    }
}

#[test]
fn consecutive_ticks_give_increasing_dates() {
    let mut previous = date_from_tick(0);
    for tick in 1..=3 * TICKS_PER_YEAR {
        let next = date_from_tick(tick);
        assert!(next > previous, "{next:?} should follow {previous:?}");
        previous = next;
    }
}

#[test]
fn first_tick_and_year_rollover() {
    assert_eq!(date_from_tick(0), date(1, 1, 1, 1));
    assert_eq!(date_from_tick(TICKS_PER_YEAR - 1), date(1, 52, 7, 96));
    assert_eq!(date_from_tick(TICKS_PER_YEAR), date(2, 1, 1, 1));
    assert_eq!(date_from_tick(TICKS_PER_DAY * 7), date(1, 2, 1, 1));
}

#[test]
fn display_forms() {
    assert_eq!(compact(&date(1, 1, 1, 1)), "Day 1, Week 1, Year 1");
    assert_eq!(verbose(&date(1, 1, 1, 1)).unwrap(), "Day 1, Week 1, Year 1 — 00:00");
    assert_eq!(verbose(&date(1, 1, 1, 5)).unwrap(), "Day 1, Week 1, Year 1 — 01:00");
    assert_eq!(
        verbose(&date_from_tick(TICKS_PER_YEAR + 7 * TICKS_PER_DAY + 33)).unwrap(),
        "Day 1, Week 2, Year 2 — 08:15"
    );
}

#[test]
fn invalid_inputs_are_errors() {
    assert_eq!(tick_from_raw(-1), Err(CalendarError::NegativeTick { tick: -1 }));
    assert_eq!(tick_from_raw(42), Ok(42));

    for bad in [
        date(0, 1, 1, 1),
        date(1, 0, 1, 1),
        date(1, 53, 1, 1),
        date(1, 1, 0, 1),
        date(1, 1, 8, 1),
        date(1, 1, 1, 0),
        date(1, 1, 1, 97),
    ] {
        assert!(
            matches!(
                tick_from_date(&bad),
                Err(CalendarError::FieldOutOfRange { .. })
            ),
            "{bad:?} should be rejected"
        );
        assert!(verbose(&bad).is_err(), "{bad:?} should not format");
    }
}

fn valid_date() -> impl Strategy<Value = CalendarDate> {
    (1u64..=u64::MAX / TICKS_PER_YEAR, 1u8..=52, 1u8..=7, 1u8..=96)
        .prop_map(|(year, week, day, quarter_tick)| date(year, week, day, quarter_tick))
}

proptest! {
    #[test]
    fn every_valid_date_round_trips(d in valid_date()) {
        let tick = tick_from_date(&d).unwrap();
        prop_assert_eq!(date_from_tick(tick), d);
    }

    #[test]
    fn small_years_round_trip(d in (1u64..=50, 1u8..=52, 1u8..=7, 1u8..=96)
        .prop_map(|(y, w, dd, q)| date(y, w, dd, q)))
    {
        let tick = tick_from_date(&d).unwrap();
        prop_assert!(tick < 50 * TICKS_PER_YEAR);
        prop_assert_eq!(date_from_tick(tick), d);
    }

    #[test]
    fn day_start_is_the_first_quarter(tick in 0u64..=1_000_000_000) {
        let d = date_from_tick(tick);
        let start = start_of_day(&d).unwrap();
        prop_assert!(start <= tick);
        prop_assert!(tick - start < TICKS_PER_DAY);
        let first = date_from_tick(start);
        prop_assert_eq!(first.quarter_tick, 1);
        prop_assert_eq!(day_of(&first), day_of(&d));
    }

    #[test]
    fn month_is_within_the_year(tick in 0u64..=1_000_000_000) {
        let month = month_of(&date_from_tick(tick)).unwrap();
        prop_assert!((1..=13).contains(&month));
    }
}
