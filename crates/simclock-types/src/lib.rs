//! Shared type definitions for the simclock companion.
//!
//! This crate holds the value types that cross the boundary between the
//! calendar engine and the desktop UI. Every type here flows downstream to
//! `TypeScript` via `ts-rs`, so the UI renders exactly what the engine
//! produced.
//!
//! # Modules
//!
//! - [`enums`] -- Game speed and relative-time direction
//! - [`structs`] -- Calendar dates, calendar days, clock times and tick snapshots

pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Direction, GameSpeed};
pub use structs::{CalendarDate, CalendarDay, ClockTime, TickSnapshot};
