//! Human-friendly offsets between two points in simulated time.
//!
//! Two renderers are provided:
//!
//! - **Rounded** ([`relative`]): "Right now", "Recently", then whole days,
//!   weeks or years rounded to the nearest unit. Used for coarse labels such
//!   as "time since hire".
//! - **Precise** ([`precise_relative`]): hours and minutes below one day,
//!   otherwise whole days truncated toward zero. Truncation keeps the
//!   reported value a strict lower bound.
//!
//! Both take a `from` reference and a `to` target. A target after the
//! reference renders as `"In ..."`, one before it as `"... ago"`.

use core::fmt;

use simclock_types::{CalendarDate, Direction};

use crate::calendar::{
    DAYS_PER_WEEK, MINUTES_PER_TICK, TICKS_PER_DAY, TICKS_PER_WEEK, TICKS_PER_YEAR,
    WEEKS_PER_YEAR, tick_from_date,
};
use crate::error::CalendarError;

/// A rounded relative time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeTime {
    /// Both points are the same tick.
    RightNow,
    /// Less than one day apart. The text form does not show the direction.
    Recently {
        /// Which side of the reference the target lies on.
        direction: Direction,
    },
    /// Fewer than 7 rounded days apart.
    Days {
        /// Rounded day count (1-6).
        count: u64,
        /// Which side of the reference the target lies on.
        direction: Direction,
    },
    /// Fewer than 52 rounded weeks apart.
    Weeks {
        /// Rounded week count (1-51).
        count: u64,
        /// Which side of the reference the target lies on.
        direction: Direction,
    },
    /// 52 rounded weeks or more apart.
    Years {
        /// Rounded year count.
        count: u64,
        /// Which side of the reference the target lies on.
        direction: Direction,
    },
}

impl fmt::Display for RelativeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::RightNow => f.write_str("Right now"),
            Self::Recently { .. } => f.write_str("Recently"),
            Self::Days { count, direction } => {
                f.write_str(&direction.apply(&pluralize(count, "day")))
            }
            Self::Weeks { count, direction } => {
                f.write_str(&direction.apply(&pluralize(count, "week")))
            }
            Self::Years { count, direction } => {
                f.write_str(&direction.apply(&pluralize(count, "year")))
            }
        }
    }
}

/// A precise relative time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreciseRelativeTime {
    /// Both points are the same tick.
    RightNow,
    /// Less than one day apart.
    Clock {
        /// Whole hours (0-23).
        hours: u64,
        /// Remaining minutes (0, 15, 30 or 45).
        minutes: u64,
        /// Which side of the reference the target lies on.
        direction: Direction,
    },
    /// One day or more apart.
    Days {
        /// Whole days, truncated.
        count: u64,
        /// Which side of the reference the target lies on.
        direction: Direction,
    },
}

impl fmt::Display for PreciseRelativeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::RightNow => f.write_str("Right now"),
            Self::Clock {
                hours,
                minutes,
                direction,
            } => {
                let mut parts = Vec::with_capacity(2);
                if hours > 0 {
                    parts.push(pluralize(hours, "hour"));
                }
                if minutes > 0 {
                    parts.push(pluralize(minutes, "minute"));
                }
                if parts.is_empty() {
                    // A non-zero tick distance is always at least 15 minutes.
                    return f.write_str("Just now");
                }
                f.write_str(&direction.apply(&parts.join(" ")))
            }
            Self::Days { count, direction } => {
                f.write_str(&direction.apply(&pluralize(count, "day")))
            }
        }
    }
}

/// Rounded relative time between two dates.
///
/// # Errors
///
/// Returns a [`CalendarError`] if either date is invalid.
pub fn relative(from: &CalendarDate, to: &CalendarDate) -> Result<RelativeTime, CalendarError> {
    Ok(relative_between_ticks(
        tick_from_date(from)?,
        tick_from_date(to)?,
    ))
}

/// Rounded relative time between two ticks.
pub fn relative_between_ticks(from: u64, to: u64) -> RelativeTime {
    let Some((magnitude, direction)) = span(from, to) else {
        return RelativeTime::RightNow;
    };

    if magnitude < TICKS_PER_DAY {
        return RelativeTime::Recently { direction };
    }

    let days = round_div(magnitude, TICKS_PER_DAY);
    if days < DAYS_PER_WEEK {
        return RelativeTime::Days {
            count: days,
            direction,
        };
    }

    let weeks = round_div(magnitude, TICKS_PER_WEEK);
    if weeks < WEEKS_PER_YEAR {
        return RelativeTime::Weeks {
            count: weeks,
            direction,
        };
    }

    RelativeTime::Years {
        count: round_div(magnitude, TICKS_PER_YEAR),
        direction,
    }
}

/// Text form of [`relative`], e.g. `"3 days ago"` or `"In 4 weeks"`.
///
/// # Errors
///
/// Returns a [`CalendarError`] if either date is invalid.
pub fn relative_string(from: &CalendarDate, to: &CalendarDate) -> Result<String, CalendarError> {
    Ok(relative(from, to)?.to_string())
}

/// Precise relative time between two dates.
///
/// # Errors
///
/// Returns a [`CalendarError`] if either date is invalid.
pub fn precise_relative(
    from: &CalendarDate,
    to: &CalendarDate,
) -> Result<PreciseRelativeTime, CalendarError> {
    Ok(precise_relative_between_ticks(
        tick_from_date(from)?,
        tick_from_date(to)?,
    ))
}

/// Precise relative time between two ticks.
pub fn precise_relative_between_ticks(from: u64, to: u64) -> PreciseRelativeTime {
    let Some((magnitude, direction)) = span(from, to) else {
        return PreciseRelativeTime::RightNow;
    };

    if magnitude < TICKS_PER_DAY {
        let total_minutes = magnitude.saturating_mul(MINUTES_PER_TICK);
        return PreciseRelativeTime::Clock {
            hours: total_minutes / 60,
            minutes: total_minutes % 60,
            direction,
        };
    }

    PreciseRelativeTime::Days {
        count: magnitude / TICKS_PER_DAY,
        direction,
    }
}

/// Text form of [`precise_relative`], e.g. `"1 hour 30 minutes ago"`.
///
/// # Errors
///
/// Returns a [`CalendarError`] if either date is invalid.
pub fn precise_relative_string(
    from: &CalendarDate,
    to: &CalendarDate,
) -> Result<String, CalendarError> {
    Ok(precise_relative(from, to)?.to_string())
}

/// Distance and direction from `from` to `to`, or `None` when equal.
fn span(from: u64, to: u64) -> Option<(u64, Direction)> {
    if from == to {
        return None;
    }
    let direction = if to > from {
        Direction::Future
    } else {
        Direction::Past
    };
    Some((to.abs_diff(from), direction))
}

/// `value / divisor` rounded half away from zero. `divisor` must be non-zero.
fn round_div(value: u64, divisor: u64) -> u64 {
    let quotient = value / divisor;
    let remainder = value % divisor;
    if remainder >= divisor.saturating_sub(remainder) {
        quotient.saturating_add(1)
    } else {
        quotient
    }
}

fn pluralize(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}
