//! Conversion between the simulation tick counter and calendar dates.
//!
//! The simulated calendar is a fixed synthetic year: 96 quarter-hour ticks
//! per day, 7 days per week, 52 weeks per year. There are no leap years and
//! no variable month lengths, so every tick maps to exactly one
//! [`CalendarDate`] and every valid date maps back to exactly one tick.
//!
//! # Design Principles
//!
//! - The tick is the source of truth. Dates are always derived from it and
//!   never stored independently.
//! - Inputs arriving from outside are validated, never clamped.
//! - All functions are pure and hold no state between calls, so calling
//!   them with a repeated or a smaller tick (after a backend reset) is fine.

use simclock_types::{CalendarDate, CalendarDay};

use crate::error::{CalendarError, CalendarField, check_range};

/// Quarter-hour ticks in one simulated day.
pub const TICKS_PER_DAY: u64 = 96;

/// Days in one simulated week.
pub const DAYS_PER_WEEK: u64 = 7;

/// Weeks in one simulated year.
pub const WEEKS_PER_YEAR: u64 = 52;

/// Days in one simulated year (364).
pub const DAYS_PER_YEAR: u64 = DAYS_PER_WEEK * WEEKS_PER_YEAR;

/// Ticks in one simulated week (672).
pub const TICKS_PER_WEEK: u64 = DAYS_PER_WEEK * TICKS_PER_DAY;

/// Ticks in one simulated year (34,944).
pub const TICKS_PER_YEAR: u64 = DAYS_PER_YEAR * TICKS_PER_DAY;

/// Simulated minutes represented by one tick.
pub const MINUTES_PER_TICK: u64 = 15;

/// Weeks in one calendar month. Months are a grouping of whole weeks.
pub const WEEKS_PER_MONTH: u64 = 4;

/// Months in one simulated year (13).
pub const MONTHS_PER_YEAR: u64 = WEEKS_PER_YEAR / WEEKS_PER_MONTH;

/// Ticks in one 4-week month (2,688).
pub const TICKS_PER_MONTH: u64 = WEEKS_PER_MONTH * TICKS_PER_WEEK;

/// Convert a tick into its calendar date.
///
/// Tick 0 is `Day 1, Week 1, Year 1` at quarter tick 1. Every `u64` is a
/// valid input.
pub fn date_from_tick(tick: u64) -> CalendarDate {
    let year = (tick / TICKS_PER_YEAR).saturating_add(1);
    let remaining = tick % TICKS_PER_YEAR;

    let day_index = remaining / TICKS_PER_DAY;
    let quarter_index = remaining % TICKS_PER_DAY;

    CalendarDate {
        year,
        week: one_based(day_index / DAYS_PER_WEEK),
        day: one_based(day_index % DAYS_PER_WEEK),
        quarter_tick: one_based(quarter_index),
    }
}

/// Convert a calendar date back into its tick.
///
/// This is the inverse of [`date_from_tick`] over all valid dates.
///
/// # Errors
///
/// Returns [`CalendarError::FieldOutOfRange`] if any field is outside its
/// range, or [`CalendarError::TickOverflow`] if the year is so large that
/// the tick would not fit in a `u64`.
pub fn tick_from_date(date: &CalendarDate) -> Result<u64, CalendarError> {
    validate_date(date)?;

    let overflow = || CalendarError::TickOverflow { year: date.year };

    // Validation guarantees every 1-based field is at least 1.
    let year_part = date
        .year
        .saturating_sub(1)
        .checked_mul(TICKS_PER_YEAR)
        .ok_or_else(overflow)?;
    let week_part = u64::from(date.week.saturating_sub(1)).saturating_mul(TICKS_PER_WEEK);
    let day_part = u64::from(date.day.saturating_sub(1)).saturating_mul(TICKS_PER_DAY);
    let quarter_part = u64::from(date.quarter_tick.saturating_sub(1));

    year_part
        .checked_add(week_part)
        .and_then(|t| t.checked_add(day_part))
        .and_then(|t| t.checked_add(quarter_part))
        .ok_or_else(overflow)
}

/// Validate a raw tick received from outside the engine.
///
/// The simulation process reports ticks as plain JSON numbers, so the host
/// may hold them as signed integers.
///
/// # Errors
///
/// Returns [`CalendarError::NegativeTick`] if `raw` is below zero.
pub fn tick_from_raw(raw: i64) -> Result<u64, CalendarError> {
    u64::try_from(raw).map_err(|_err| CalendarError::NegativeTick { tick: raw })
}

/// Check every field of `date` against its declared range.
///
/// # Errors
///
/// Returns [`CalendarError::FieldOutOfRange`] naming the first offending
/// field, checked in the order year, week, day, quarter tick.
pub fn validate_date(date: &CalendarDate) -> Result<(), CalendarError> {
    check_range(CalendarField::Year, date.year, 1, u64::MAX)?;
    check_range(CalendarField::Week, date.week, 1, WEEKS_PER_YEAR)?;
    check_range(CalendarField::Day, date.day, 1, DAYS_PER_WEEK)?;
    check_range(CalendarField::QuarterTick, date.quarter_tick, 1, TICKS_PER_DAY)
}

/// Truncate a date to its calendar day.
pub fn day_of(date: &CalendarDate) -> CalendarDay {
    CalendarDay::from(date)
}

/// Return the tick at which the day containing `date` begins.
///
/// # Errors
///
/// Same as [`tick_from_date`].
pub fn start_of_day(date: &CalendarDate) -> Result<u64, CalendarError> {
    tick_from_date(&CalendarDate {
        quarter_tick: 1,
        ..*date
    })
}

// ---------------------------------------------------------------------------
// Months
// ---------------------------------------------------------------------------

/// Return the 4-week month (1-13) that contains `date`.
///
/// # Errors
///
/// Returns [`CalendarError::FieldOutOfRange`] if `date` is not valid.
pub fn month_of(date: &CalendarDate) -> Result<u8, CalendarError> {
    validate_date(date)?;
    let week_index = u64::from(date.week.saturating_sub(1));
    Ok(one_based(week_index / WEEKS_PER_MONTH))
}

/// Return the week within its month (1-4) for `date`.
///
/// # Errors
///
/// Returns [`CalendarError::FieldOutOfRange`] if `date` is not valid.
pub fn week_in_month(date: &CalendarDate) -> Result<u8, CalendarError> {
    validate_date(date)?;
    let week_index = u64::from(date.week.saturating_sub(1));
    Ok(one_based(week_index % WEEKS_PER_MONTH))
}

/// Return the first quarter tick of `month` in `year`.
///
/// # Errors
///
/// Returns [`CalendarError::FieldOutOfRange`] if `year` is 0 or `month` is
/// outside 1-13.
pub fn month_start(year: u64, month: u8) -> Result<CalendarDate, CalendarError> {
    date_from_month_tick(year, month, 0)
}

/// Return the tick offset of `date` within its month (0-2687).
///
/// # Errors
///
/// Returns [`CalendarError::FieldOutOfRange`] if `date` is not valid.
pub fn tick_in_month(date: &CalendarDate) -> Result<u64, CalendarError> {
    let week = u64::from(week_in_month(date)?.saturating_sub(1));
    let day = u64::from(date.day.saturating_sub(1));
    let quarter = u64::from(date.quarter_tick.saturating_sub(1));

    Ok(week
        .saturating_mul(TICKS_PER_WEEK)
        .saturating_add(day.saturating_mul(TICKS_PER_DAY))
        .saturating_add(quarter))
}

/// Build a date from a year, a month and a tick offset within that month.
///
/// This is the inverse of [`month_of`] together with [`tick_in_month`].
///
/// # Errors
///
/// Returns [`CalendarError::FieldOutOfRange`] if `year` is 0, `month` is
/// outside 1-13, or `tick_in_month` is 2688 or more.
pub fn date_from_month_tick(
    year: u64,
    month: u8,
    tick_in_month: u64,
) -> Result<CalendarDate, CalendarError> {
    check_range(CalendarField::Year, year, 1, u64::MAX)?;
    check_range(CalendarField::Month, month, 1, MONTHS_PER_YEAR)?;
    check_range(
        CalendarField::TickInMonth,
        tick_in_month,
        0,
        TICKS_PER_MONTH.saturating_sub(1),
    )?;

    let first_week_index = u64::from(month.saturating_sub(1)).saturating_mul(WEEKS_PER_MONTH);
    let week_index = first_week_index.saturating_add(tick_in_month / TICKS_PER_WEEK);
    let within_week = tick_in_month % TICKS_PER_WEEK;

    Ok(CalendarDate {
        year,
        week: one_based(week_index),
        day: one_based(within_week / TICKS_PER_DAY),
        quarter_tick: one_based(within_week % TICKS_PER_DAY),
    })
}

/// Turn a 0-based index into a 1-based calendar field.
///
/// Callers only pass indices bounded by one of the calendar moduli, so the
/// result always fits in a `u8`.
fn one_based(index: u64) -> u8 {
    u8::try_from(index.saturating_add(1)).unwrap_or(u8::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(year: u64, week: u8, day: u8, quarter_tick: u8) -> CalendarDate {
        CalendarDate {
            year,
            week,
            day,
            quarter_tick,
        }
    }

    #[test]
    fn derived_constants() {
        assert_eq!(DAYS_PER_YEAR, 364);
        assert_eq!(TICKS_PER_YEAR, 34_944);
        assert_eq!(MONTHS_PER_YEAR, 13);
        assert_eq!(TICKS_PER_MONTH, 2_688);
    }

    #[test]
    fn tick_zero_is_first_quarter() {
        assert_eq!(date_from_tick(0), CalendarDate::default());
        assert_eq!(tick_from_date(&CalendarDate::default()).unwrap(), 0);
    }

    #[test]
    fn day_boundary() {
        assert_eq!(date_from_tick(TICKS_PER_DAY - 1), date(1, 1, 1, 96));
        assert_eq!(date_from_tick(TICKS_PER_DAY), date(1, 1, 2, 1));
    }

    #[test]
    fn week_boundary() {
        assert_eq!(date_from_tick(TICKS_PER_WEEK - 1), date(1, 1, 7, 96));
        assert_eq!(date_from_tick(TICKS_PER_WEEK), date(1, 2, 1, 1));
    }

    #[test]
    fn year_rollover() {
        assert_eq!(date_from_tick(TICKS_PER_YEAR - 1), date(1, 52, 7, 96));
        assert_eq!(date_from_tick(TICKS_PER_YEAR), date(2, 1, 1, 1));
        assert_eq!(
            date_from_tick(TICKS_PER_YEAR + TICKS_PER_DAY),
            date(2, 1, 2, 1)
        );
    }

    #[test]
    fn largest_tick_converts() {
        let last = date_from_tick(u64::MAX);
        assert_eq!(tick_from_date(&last).unwrap(), u64::MAX);
    }

    #[test]
    fn overflowing_year_is_rejected() {
        let beyond = date(u64::MAX, 1, 1, 1);
        assert_eq!(
            tick_from_date(&beyond),
            Err(CalendarError::TickOverflow { year: u64::MAX })
        );
    }

    #[test]
    fn negative_raw_tick_is_rejected() {
        assert_eq!(tick_from_raw(12).unwrap(), 12);
        assert_eq!(tick_from_raw(0).unwrap(), 0);
        assert_eq!(
            tick_from_raw(-1),
            Err(CalendarError::NegativeTick { tick: -1 })
        );
    }

    #[test]
    fn out_of_range_fields_are_not_clamped() {
        let cases = [
            (date(0, 1, 1, 1), CalendarField::Year),
            (date(1, 0, 1, 1), CalendarField::Week),
            (date(1, 53, 1, 1), CalendarField::Week),
            (date(1, 1, 0, 1), CalendarField::Day),
            (date(1, 1, 8, 1), CalendarField::Day),
            (date(1, 1, 1, 0), CalendarField::QuarterTick),
            (date(1, 1, 1, 97), CalendarField::QuarterTick),
        ];
        for (bad, expected) in cases {
            let err = tick_from_date(&bad).unwrap_err();
            assert!(
                matches!(err, CalendarError::FieldOutOfRange { field, .. } if field == expected),
                "expected {expected} error for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn start_of_day_drops_quarter() {
        let evening = date(2, 3, 4, 80);
        let start = start_of_day(&evening).unwrap();
        assert_eq!(date_from_tick(start), date(2, 3, 4, 1));
        assert_eq!(day_of(&evening), day_of(&date_from_tick(start)));
    }

    #[test]
    fn month_helpers() {
        let d = date(1, 6, 3, 10);
        assert_eq!(month_of(&d).unwrap(), 2);
        assert_eq!(week_in_month(&d).unwrap(), 2);
        assert_eq!(month_of(&date(1, 52, 7, 96)).unwrap(), 13);
        assert_eq!(week_in_month(&date(1, 52, 7, 96)).unwrap(), 4);

        assert_eq!(month_start(4, 2).unwrap(), date(4, 5, 1, 1));
        assert_eq!(tick_in_month(&date(4, 5, 1, 1)).unwrap(), 0);
        assert_eq!(
            tick_in_month(&date(1, 52, 7, 96)).unwrap(),
            TICKS_PER_MONTH - 1
        );
    }

    #[test]
    fn month_tick_roundtrip() {
        for tick in (0..TICKS_PER_YEAR * 2).step_by(37) {
            let d = date_from_tick(tick);
            let rebuilt =
                date_from_month_tick(d.year, month_of(&d).unwrap(), tick_in_month(&d).unwrap())
                    .unwrap();
            assert_eq!(rebuilt, d, "month roundtrip failed for tick {tick}");
        }
    }

    #[test]
    fn month_inputs_are_validated() {
        assert!(month_start(1, 0).is_err());
        assert!(month_start(1, 14).is_err());
        assert!(month_start(0, 1).is_err());
        assert!(date_from_month_tick(1, 1, TICKS_PER_MONTH).is_err());
        assert!(month_of(&date(1, 0, 1, 1)).is_err());
    }
}
