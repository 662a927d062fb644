//! Calendar engine and tick feed for the simclock companion.
//!
//! The simulation backend owns a single `u64` tick counter. Everything the
//! UI shows about simulated time is derived from that counter by the pure
//! functions in this crate.
//!
//! # Modules
//!
//! - [`calendar`] -- Tick/date conversion, calendar constants, day and
//!   month helpers.
//! - [`format`] -- Compact and verbose date strings, wall-clock helpers.
//! - [`relative`] -- Rounded and precise relative-time humanization.
//! - [`error`] -- [`CalendarError`], the invalid-input error of the engine.
//! - [`config`] -- Configuration loading from `simclock-config.yaml`.
//! - [`feed`] -- Polling loop that turns raw ticks into [`TickSnapshot`]s.
//!
//! [`CalendarError`]: error::CalendarError
//! [`TickSnapshot`]: simclock_types::TickSnapshot

pub mod calendar;
pub mod config;
pub mod error;
pub mod feed;
pub mod format;
pub mod relative;

pub use error::{CalendarError, CalendarField};
