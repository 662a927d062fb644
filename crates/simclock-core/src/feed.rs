//! Tick feed: the host-side polling loop around the external tick source.
//!
//! The simulation process owns the tick counter. The host pulls the current
//! value at a fixed cadence, validates it, derives a [`TickSnapshot`] and
//! hands it to a [`SnapshotCallback`] (a UI store, a terminal printer, ...).
//!
//! # Guarantees
//!
//! - The current tick is passed explicitly into the calendar functions on
//!   every poll. The feed keeps only the last published snapshot, to skip
//!   unchanged republishing.
//! - Negative readings are rejected and logged; the previous snapshot stays
//!   current.
//! - A tick smaller than the previous one (backend reset) is logged and
//!   rendered as-is.
//! - A callback can end the feed by returning [`ControlFlow::Break`].

use std::ops::ControlFlow;

use simclock_types::{GameSpeed, TickSnapshot};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::calendar::{date_from_tick, tick_from_raw};
use crate::config::{ClockStyle, DisplayConfig, FeedConfig, RelativeMode};
use crate::error::CalendarError;
use crate::format;
use crate::relative::{precise_relative_between_ticks, relative_between_ticks};

/// Errors that can occur while polling the tick source.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The underlying reader failed.
    #[error("failed to read from tick source: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The source produced a reading that could not be parsed.
    #[error("malformed tick reading {input:?}: {reason}")]
    Malformed {
        /// The raw input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// One raw reading from the simulation process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReading {
    /// Tick as reported. Signed because the wire format does not forbid
    /// negative numbers.
    pub tick: i64,
    /// Playback speed, if the source reports it.
    pub game_speed: Option<GameSpeed>,
}

/// A source of raw tick readings.
///
/// Implementations wrap whatever transport reaches the simulation process.
/// [`run_feed`] calls [`poll_tick`] once per polling interval.
///
/// [`poll_tick`]: TickSource::poll_tick
pub trait TickSource {
    /// Read the current tick.
    ///
    /// Returns `Ok(None)` once the source is exhausted and will never
    /// produce another reading.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Malformed`] for a reading that cannot be parsed
    /// (the feed skips it and keeps polling) or [`FeedError::Io`] when the
    /// transport fails (the feed stops).
    fn poll_tick(&mut self) -> impl Future<Output = Result<Option<TickReading>, FeedError>> + Send;
}

/// Receives every new snapshot published by the feed.
pub trait SnapshotCallback {
    /// Called when the snapshot differs from the previously published one.
    ///
    /// Returning [`ControlFlow::Break`] stops the feed with
    /// [`FeedEndReason::CallbackStopped`].
    fn on_snapshot(&mut self, snapshot: &TickSnapshot) -> ControlFlow<()>;
}

/// Plain closures observe every snapshot and never stop the feed.
impl<F> SnapshotCallback for F
where
    F: FnMut(&TickSnapshot),
{
    fn on_snapshot(&mut self, snapshot: &TickSnapshot) -> ControlFlow<()> {
        self(snapshot);
        ControlFlow::Continue(())
    }
}

/// Why [`run_feed`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedEndReason {
    /// The source reported that it has no more readings.
    SourceExhausted,
    /// The configured `max_polls` limit was reached.
    MaxPollsReached,
    /// The snapshot callback asked the feed to stop.
    CallbackStopped,
}

/// Counters describing a finished feed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSummary {
    /// Why the feed stopped.
    pub end_reason: FeedEndReason,
    /// Readings obtained from the source, including rejected ones.
    pub polls: u64,
    /// Snapshots handed to the callback.
    pub published: u64,
    /// Readings that were negative or malformed.
    pub rejected: u64,
    /// Readings whose tick was below the previous accepted tick.
    pub regressions: u64,
    /// The last snapshot handed to the callback.
    pub last_snapshot: Option<TickSnapshot>,
}

/// Build the snapshot for an already validated tick.
pub fn snapshot_for(tick: u64, game_speed: Option<GameSpeed>) -> TickSnapshot {
    TickSnapshot {
        tick,
        date: date_from_tick(tick),
        game_speed,
    }
}

/// Poll `source` until it is exhausted, `max_polls` is reached, or the
/// callback asks to stop.
///
/// Sleeps `poll_interval_ms` between polls; an interval of 0 polls back to
/// back.
///
/// # Errors
///
/// Returns [`FeedError::Io`] if the source fails. Malformed readings are
/// counted as rejected and do not stop the feed.
pub async fn run_feed<S, C>(
    source: &mut S,
    config: &FeedConfig,
    callback: &mut C,
) -> Result<FeedSummary, FeedError>
where
    S: TickSource,
    C: SnapshotCallback + ?Sized,
{
    info!(
        poll_interval_ms = config.poll_interval_ms,
        max_polls = ?config.max_polls,
        "Tick feed starting"
    );

    let mut polls: u64 = 0;
    let mut published: u64 = 0;
    let mut rejected: u64 = 0;
    let mut regressions: u64 = 0;
    let mut last_snapshot: Option<TickSnapshot> = None;

    let end_reason = loop {
        if config.max_polls.is_some_and(|max| polls >= max) {
            break FeedEndReason::MaxPollsReached;
        }

        let reading = match source.poll_tick().await {
            Ok(Some(reading)) => reading,
            Ok(None) => break FeedEndReason::SourceExhausted,
            Err(FeedError::Malformed { input, reason }) => {
                polls = polls.saturating_add(1);
                rejected = rejected.saturating_add(1);
                warn!(input = %input, reason = %reason, "Skipping malformed tick reading");
                pause(config.poll_interval_ms).await;
                continue;
            }
            Err(err) => return Err(err),
        };
        polls = polls.saturating_add(1);

        match tick_from_raw(reading.tick) {
            Ok(tick) => {
                let snapshot = snapshot_for(tick, reading.game_speed);
                if let Some(previous) = last_snapshot
                    && tick < previous.tick
                {
                    regressions = regressions.saturating_add(1);
                    info!(
                        previous = previous.tick,
                        tick, "Tick moved backwards, rendering from the new value"
                    );
                }

                if last_snapshot == Some(snapshot) {
                    debug!(tick, "Snapshot unchanged");
                } else {
                    debug!(
                        tick,
                        year = snapshot.date.year,
                        week = snapshot.date.week,
                        day = snapshot.date.day,
                        quarter_tick = snapshot.date.quarter_tick,
                        "Publishing snapshot"
                    );
                    let flow = callback.on_snapshot(&snapshot);
                    published = published.saturating_add(1);
                    last_snapshot = Some(snapshot);
                    if flow.is_break() {
                        info!(tick, "Snapshot callback requested stop");
                        break FeedEndReason::CallbackStopped;
                    }
                }
            }
            Err(err) => {
                rejected = rejected.saturating_add(1);
                warn!(raw_tick = reading.tick, error = %err, "Rejecting tick reading");
            }
        }

        pause(config.poll_interval_ms).await;
    };

    let summary = FeedSummary {
        end_reason,
        polls,
        published,
        rejected,
        regressions,
        last_snapshot,
    };
    info!(
        end_reason = ?summary.end_reason,
        polls,
        published,
        rejected,
        regressions,
        "Tick feed stopped"
    );
    Ok(summary)
}

async fn pause(interval_ms: u64) {
    if interval_ms > 0 {
        tokio::time::sleep(tokio::time::Duration::from_millis(interval_ms)).await;
    }
}

/// Render a snapshot as a single display line.
///
/// The line holds the date (compact or with its wall clock), the game speed
/// in brackets, and the relative time to `display.anchor_tick` in
/// parentheses, e.g. `"Day 2, Week 1, Year 1 — 09:00 [Fast] (1 day ago)"`.
///
/// # Errors
///
/// Returns a [`CalendarError`] if the snapshot's date is invalid.
pub fn render_snapshot(
    snapshot: &TickSnapshot,
    display: &DisplayConfig,
) -> Result<String, CalendarError> {
    let date = &snapshot.date;
    let mut line = match (display.verbose, display.clock) {
        (false, _) => format::compact(date),
        (true, ClockStyle::TwentyFourHour) => format::verbose(date)?,
        (true, ClockStyle::TwelveHour) => {
            format!("{} — {}", format::compact(date), format::twelve_hour(date)?)
        }
    };

    if display.show_speed
        && let Some(speed) = snapshot.game_speed
    {
        line.push_str(" [");
        line.push_str(speed.label());
        line.push(']');
    }

    if let Some(anchor) = display.anchor_tick {
        let relative = match display.relative {
            RelativeMode::Off => None,
            RelativeMode::Rounded => {
                Some(relative_between_ticks(snapshot.tick, anchor).to_string())
            }
            RelativeMode::Precise => {
                Some(precise_relative_between_ticks(snapshot.tick, anchor).to_string())
            }
        };
        if let Some(relative) = relative {
            line.push_str(" (");
            line.push_str(&relative);
            line.push(')');
        }
    }

    Ok(line)
}

// ---------------------------------------------------------------------------
// Line-oriented source
// ---------------------------------------------------------------------------

/// Reads newline-delimited readings from any [`AsyncBufRead`], such as
/// `tokio::io::BufReader::new(tokio::io::stdin())`.
///
/// Each line is `"<tick>"` or `"<tick> <speed>"`, where `<speed>` is the
/// backend's 1-5 encoding. Blank lines and lines starting with `#` are
/// skipped. A line that is not UTF-8 is reported as malformed; it has
/// already been consumed, so the next poll reads the line after it.
#[derive(Debug)]
pub struct LineTickSource<R> {
    reader: R,
    buffer: Vec<u8>,
}

impl<R: AsyncBufRead + Unpin + Send> LineTickSource<R> {
    /// Wrap a reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
        }
    }
}

impl<R: AsyncBufRead + Unpin + Send> TickSource for LineTickSource<R> {
    async fn poll_tick(&mut self) -> Result<Option<TickReading>, FeedError> {
        loop {
            self.buffer.clear();
            if self.reader.read_until(b'\n', &mut self.buffer).await? == 0 {
                return Ok(None);
            }
            let line = match std::str::from_utf8(&self.buffer) {
                Ok(text) => text.trim(),
                Err(err) => {
                    return Err(FeedError::Malformed {
                        input: String::from_utf8_lossy(&self.buffer).trim().to_owned(),
                        reason: format!("not UTF-8: {err}"),
                    });
                }
            };
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            return parse_reading(line).map(Some);
        }
    }
}

fn parse_reading(line: &str) -> Result<TickReading, FeedError> {
    let malformed = |reason: &str| FeedError::Malformed {
        input: line.to_owned(),
        reason: reason.to_owned(),
    };

    let mut fields = line.split_whitespace();
    let tick = fields
        .next()
        .ok_or_else(|| malformed("empty reading"))?
        .parse::<i64>()
        .map_err(|err| malformed(&format!("invalid tick: {err}")))?;
    let game_speed = fields
        .next()
        .map(|raw| {
            raw.parse::<u8>()
                .map(GameSpeed::from)
                .map_err(|err| malformed(&format!("invalid speed: {err}")))
        })
        .transpose()?;
    if fields.next().is_some() {
        return Err(malformed("expected at most two fields"));
    }

    Ok(TickReading { tick, game_speed })
}
