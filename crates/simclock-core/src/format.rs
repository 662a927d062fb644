//! Display strings for calendar dates and wall-clock times.
//!
//! The wall clock is derived from the quarter tick: quarter tick 1 is
//! 00:00, quarter tick 5 is 01:00, quarter tick 96 is 23:45.

use simclock_types::{CalendarDate, ClockTime};

use crate::calendar::{MINUTES_PER_TICK, TICKS_PER_DAY, validate_date};
use crate::error::{CalendarError, CalendarField, check_range};

const MINUTES_PER_HOUR: u64 = 60;

/// First hour counted as office hours.
pub const OFFICE_HOURS_START: u8 = 9;

/// First hour after office hours.
pub const OFFICE_HOURS_END: u8 = 17;

/// Clock faces on the hour, indexed by 12-hour clock hour minus one.
const CLOCK_FACES: [&str; 12] = [
    "🕐", "🕑", "🕒", "🕓", "🕔", "🕕", "🕖", "🕗", "🕘", "🕙", "🕚", "🕛",
];

/// Clock faces on the half hour, indexed by 12-hour clock hour minus one.
const HALF_CLOCK_FACES: [&str; 12] = [
    "🕜", "🕝", "🕞", "🕟", "🕠", "🕡", "🕢", "🕣", "🕤", "🕥", "🕦", "🕧",
];

/// `"Day {day}, Week {week}, Year {year}"`.
pub fn compact(date: &CalendarDate) -> String {
    format!("Day {}, Week {}, Year {}", date.day, date.week, date.year)
}

/// The compact form followed by the wall clock, e.g.
/// `"Day 3, Week 2, Year 1 — 08:15"`.
///
/// # Errors
///
/// Returns [`CalendarError::FieldOutOfRange`] if `date` is not valid.
pub fn verbose(date: &CalendarDate) -> Result<String, CalendarError> {
    validate_date(date)?;
    let clock = clock_time(date)?;
    Ok(format!("{} — {}", compact(date), clock_string(clock)))
}

/// Derive the wall-clock time of `date`.
///
/// # Errors
///
/// Returns [`CalendarError::FieldOutOfRange`] if the quarter tick is
/// outside 1-96.
pub fn clock_time(date: &CalendarDate) -> Result<ClockTime, CalendarError> {
    check_range(CalendarField::QuarterTick, date.quarter_tick, 1, TICKS_PER_DAY)?;

    let minutes = u64::from(date.quarter_tick.saturating_sub(1)).saturating_mul(MINUTES_PER_TICK);
    Ok(ClockTime {
        hour: narrow(minutes / MINUTES_PER_HOUR),
        minute: narrow(minutes % MINUTES_PER_HOUR),
    })
}

/// Return the quarter tick at which the clock shows `hour:minute`.
///
/// Scheduled triggers use this to name a time of day, e.g. 09:00 is
/// quarter tick 37.
///
/// # Errors
///
/// Returns [`CalendarError::FieldOutOfRange`] for an hour above 23 or a
/// minute above 59, and [`CalendarError::UnalignedMinute`] when `minute`
/// is not a multiple of 15.
pub fn quarter_tick_at(hour: u8, minute: u8) -> Result<u8, CalendarError> {
    check_range(CalendarField::Hour, hour, 0, 23)?;
    check_range(CalendarField::Minute, minute, 0, 59)?;
    if u64::from(minute) % MINUTES_PER_TICK != 0 {
        return Err(CalendarError::UnalignedMinute { minute });
    }

    let quarters_per_hour = MINUTES_PER_HOUR / MINUTES_PER_TICK;
    let index = u64::from(hour)
        .saturating_mul(quarters_per_hour)
        .saturating_add(u64::from(minute) / MINUTES_PER_TICK);
    Ok(narrow(index.saturating_add(1)))
}

/// Zero-padded 24-hour `"HH:MM"`.
pub fn clock_string(clock: ClockTime) -> String {
    format!("{:02}:{:02}", clock.hour, clock.minute)
}

/// Zero-padded 12-hour clock with period, e.g. `"08:15 AM"`, `"12:00 PM"`.
///
/// # Errors
///
/// Same as [`clock_time`].
pub fn twelve_hour(date: &CalendarDate) -> Result<String, CalendarError> {
    let clock = clock_time(date)?;
    let period = if clock.hour >= 12 { "PM" } else { "AM" };
    Ok(format!(
        "{:02}:{:02} {period}",
        twelve_hour_of(clock.hour),
        clock.minute
    ))
}

/// Clock-face glyph for the time of `date`, using the half-hour faces from
/// minute 30 onwards.
///
/// # Errors
///
/// Same as [`clock_time`].
pub fn clock_emoji(date: &CalendarDate) -> Result<&'static str, CalendarError> {
    let clock = clock_time(date)?;
    let faces = if clock.minute >= 30 {
        &HALF_CLOCK_FACES
    } else {
        &CLOCK_FACES
    };
    let index = usize::from(twelve_hour_of(clock.hour).saturating_sub(1));
    Ok(faces.get(index).copied().unwrap_or("🕛"))
}

/// Whether `date` falls within office hours (09:00-16:59).
///
/// # Errors
///
/// Same as [`clock_time`].
pub fn is_office_hours(date: &CalendarDate) -> Result<bool, CalendarError> {
    let clock = clock_time(date)?;
    Ok((OFFICE_HOURS_START..OFFICE_HOURS_END).contains(&clock.hour))
}

/// Map a 24-hour hour to 1-12.
const fn twelve_hour_of(hour: u8) -> u8 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

/// Values passed here are bounded by a day's minute count.
fn narrow(value: u64) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}
