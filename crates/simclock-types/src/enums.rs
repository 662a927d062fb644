//! Enumeration types for the simclock companion.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Game speed
// ---------------------------------------------------------------------------

/// Playback speed reported by the simulation process alongside the tick.
///
/// On the wire the backend encodes speeds as `1..=5`. Any value outside that
/// range is treated as [`GameSpeed::Stopped`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum GameSpeed {
    /// The simulation is paused; the tick does not advance.
    Stopped,
    /// One tick per second.
    Slow,
    /// Two ticks per second.
    #[default]
    Normal,
    /// Five ticks per second.
    Fast,
    /// As fast as the backend can run.
    Max,
}

impl GameSpeed {
    /// Human-readable label shown next to the date.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::Max => "Max",
        }
    }

    /// Whether the simulation is paused at this speed.
    pub const fn is_paused(self) -> bool {
        matches!(self, Self::Stopped)
    }
}

impl From<u8> for GameSpeed {
    fn from(value: u8) -> Self {
        match value {
            2 => Self::Slow,
            3 => Self::Normal,
            4 => Self::Fast,
            5 => Self::Max,
            _ => Self::Stopped,
        }
    }
}

impl From<GameSpeed> for u8 {
    fn from(speed: GameSpeed) -> Self {
        match speed {
            GameSpeed::Stopped => 1,
            GameSpeed::Slow => 2,
            GameSpeed::Normal => 3,
            GameSpeed::Fast => 4,
            GameSpeed::Max => 5,
        }
    }
}

// ---------------------------------------------------------------------------
// Relative-time direction
// ---------------------------------------------------------------------------

/// Whether a relative time points into the past or the future.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Direction {
    /// The target lies before the reference point ("3 days ago").
    Past,
    /// The target lies after the reference point ("In 3 days").
    Future,
}

impl Direction {
    /// Place a rendered span according to its direction.
    ///
    /// Future spans are prefixed with `"In "`, past spans are suffixed with
    /// `" ago"`. This is the only place direction wording is decided.
    pub fn apply(self, span: &str) -> String {
        match self {
            Self::Past => format!("{span} ago"),
            Self::Future => format!("In {span}"),
        }
    }
}
