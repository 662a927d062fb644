//! Calendar value types shared with the UI.
//!
//! None of these types carry behaviour beyond trivial conversions. All
//! tick arithmetic lives in `simclock-core`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::GameSpeed;

/// A position in simulated time expressed as a calendar tuple.
///
/// All fields are 1-based:
/// - `year` starts at 1
/// - `week` ranges from 1 to 52
/// - `day` ranges from 1 to 7
/// - `quarter_tick` ranges from 1 to 96 (15-minute slots within the day)
///
/// A date is always derived from a tick. The derived ordering compares
/// `(year, week, day, quarter_tick)` lexicographically, which matches the
/// ordering of the underlying ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CalendarDate {
    /// Calendar year, starting at 1.
    #[ts(type = "number")]
    pub year: u64,
    /// Week within the year (1-52).
    pub week: u8,
    /// Day within the week (1-7).
    pub day: u8,
    /// Quarter-hour slot within the day (1-96).
    pub quarter_tick: u8,
}

impl Default for CalendarDate {
    /// The date of tick 0.
    fn default() -> Self {
        Self {
            year: 1,
            week: 1,
            day: 1,
            quarter_tick: 1,
        }
    }
}

/// A calendar date truncated to day granularity.
///
/// Used as a key when grouping things that happen "on the same day".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CalendarDay {
    /// Calendar year, starting at 1.
    #[ts(type = "number")]
    pub year: u64,
    /// Week within the year (1-52).
    pub week: u8,
    /// Day within the week (1-7).
    pub day: u8,
}

impl From<CalendarDate> for CalendarDay {
    fn from(date: CalendarDate) -> Self {
        Self::from(&date)
    }
}

impl From<&CalendarDate> for CalendarDay {
    fn from(date: &CalendarDate) -> Self {
        Self {
            year: date.year,
            week: date.week,
            day: date.day,
        }
    }
}

/// Wall-clock time within a simulated day, at 15-minute resolution.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct ClockTime {
    /// Hour of the day (0-23).
    pub hour: u8,
    /// Minute of the hour (0, 15, 30 or 45).
    pub minute: u8,
}

/// The current tick as published to the UI on every poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TickSnapshot {
    /// Raw tick counter reported by the simulation.
    #[ts(type = "number")]
    pub tick: u64,
    /// Calendar date derived from `tick`.
    pub date: CalendarDate,
    /// Playback speed, when the source reported one.
    pub game_speed: Option<GameSpeed>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_date_is_first_quarter_of_year_one() {
        let date = CalendarDate::default();
        assert_eq!(date.year, 1);
        assert_eq!(date.week, 1);
        assert_eq!(date.day, 1);
        assert_eq!(date.quarter_tick, 1);
    }

    const fn date(year: u64, week: u8, day: u8, quarter_tick: u8) -> CalendarDate {
        CalendarDate {
            year,
            week,
            day,
            quarter_tick,
        }
    }

    #[test]
    fn dates_order_by_calendar_fields() {
        let a = date(1, 1, 1, 2);
        let b = date(1, 1, 2, 1);
        let c = date(1, 2, 1, 1);
        let end_of_year = date(1, 52, 7, 96);
        let next_year = date(2, 1, 1, 1);

        assert!(CalendarDate::default() < a);
        assert!(a < b);
        assert!(b < c);
        assert!(end_of_year < next_year);
    }

    #[test]
    fn calendar_day_drops_quarter_tick() {
        let morning = date(3, 10, 4, 5);
        let evening = CalendarDate {
            quarter_tick: 90,
            ..morning
        };
        assert_eq!(CalendarDay::from(morning), CalendarDay::from(&evening));
        assert_eq!(
            CalendarDay::from(morning),
            CalendarDay {
                year: 3,
                week: 10,
                day: 4
            }
        );
    }

    #[test]
    fn snapshot_serializes_flat_date_fields() {
        let snapshot = TickSnapshot {
            tick: 0,
            date: CalendarDate::default(),
            game_speed: Some(GameSpeed::Fast),
        };
        let json = serde_json::to_value(snapshot).unwrap();
        assert_eq!(json["tick"], 0);
        assert_eq!(json["date"]["quarter_tick"], 1);
        assert_eq!(json["game_speed"], "Fast");

        let back: TickSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }
}
