//! Invalid-input errors raised by the calendar engine.
//!
//! The engine never clamps or corrects its input. A negative tick or a
//! date with a field outside its range is reported back to the caller,
//! because a silently corrected date would alias to a different tick.

use core::fmt;

/// A calendar component that can fail range validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarField {
    /// `CalendarDate::year`.
    Year,
    /// `CalendarDate::week`.
    Week,
    /// `CalendarDate::day`.
    Day,
    /// `CalendarDate::quarter_tick`.
    QuarterTick,
    /// A 4-week month number.
    Month,
    /// A tick offset within a 4-week month.
    TickInMonth,
    /// An hour of the day.
    Hour,
    /// A minute of the hour.
    Minute,
}

impl fmt::Display for CalendarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Year => "year",
            Self::Week => "week",
            Self::Day => "day",
            Self::QuarterTick => "quarter_tick",
            Self::Month => "month",
            Self::TickInMonth => "tick_in_month",
            Self::Hour => "hour",
            Self::Minute => "minute",
        };
        f.write_str(name)
    }
}

/// Errors returned by calendar conversions and formatters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// A raw tick from outside the engine was negative.
    #[error("tick must be non-negative, got {tick}")]
    NegativeTick {
        /// The rejected raw tick.
        tick: i64,
    },

    /// A calendar component lies outside its declared range.
    #[error("{field} out of range: {value} not in {min}..={max}")]
    FieldOutOfRange {
        /// The offending component.
        field: CalendarField,
        /// The value that was supplied.
        value: u64,
        /// Smallest accepted value.
        min: u64,
        /// Largest accepted value.
        max: u64,
    },

    /// A minute value that does not fall on a 15-minute boundary.
    #[error("minute {minute} is not a multiple of 15")]
    UnalignedMinute {
        /// The rejected minute.
        minute: u8,
    },

    /// The date is valid but its tick would not fit in a `u64`.
    #[error("year {year} is too large to express as a tick")]
    TickOverflow {
        /// The year that overflowed.
        year: u64,
    },
}

/// Check that `value` lies in `min..=max`.
pub(crate) fn check_range(
    field: CalendarField,
    value: impl Into<u64>,
    min: u64,
    max: u64,
) -> Result<(), CalendarError> {
    let value = value.into();
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CalendarError::FieldOutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
