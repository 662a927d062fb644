//! Snapshot callback that prints one rendered line per published snapshot.
//!
//! The first render or write error stops the feed. It is held until the
//! feed returns and then surfaced by `main`.

use std::io::Write;
use std::ops::ControlFlow;

use simclock_core::config::DisplayConfig;
use simclock_core::feed::{SnapshotCallback, render_snapshot};
use simclock_types::TickSnapshot;
use tracing::{debug, error};

use crate::error::CliError;

/// Writes rendered snapshots to `out`.
pub struct LinePrinter<W> {
    out: W,
    display: DisplayConfig,
    lines: u64,
    failure: Option<CliError>,
}

impl<W: Write> LinePrinter<W> {
    /// Create a printer with the given display settings.
    pub const fn new(out: W, display: DisplayConfig) -> Self {
        Self {
            out,
            display,
            lines: 0,
            failure: None,
        }
    }

    /// Number of lines written so far.
    pub const fn lines(&self) -> u64 {
        self.lines
    }

    /// Return the writer, or the first error hit while printing.
    pub fn finish(self) -> Result<W, CliError> {
        self.failure.map_or(Ok(self.out), Err)
    }

    fn print(&mut self, snapshot: &TickSnapshot) -> Result<(), CliError> {
        let line = render_snapshot(snapshot, &self.display)?;
        writeln!(self.out, "{line}").map_err(|source| CliError::Output { source })?;
        self.out
            .flush()
            .map_err(|source| CliError::Output { source })?;
        Ok(())
    }
}

impl<W: Write> SnapshotCallback for LinePrinter<W> {
    fn on_snapshot(&mut self, snapshot: &TickSnapshot) -> ControlFlow<()> {
        if self.failure.is_some() {
            return ControlFlow::Break(());
        }
        match self.print(snapshot) {
            Ok(()) => {
                self.lines = self.lines.saturating_add(1);
                debug!(tick = snapshot.tick, "Snapshot printed");
                ControlFlow::Continue(())
            }
            Err(err) => {
                error!(tick = snapshot.tick, error = %err, "Failed to print snapshot");
                self.failure = Some(err);
                ControlFlow::Break(())
            }
        }
    }
}
