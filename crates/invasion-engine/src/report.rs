//! Step callback that writes destruction events as they happen.

use std::io::{self, Write};

use invasion_core::{StepCallback, StepReport};
use invasion_types::DestructionEvent;
use tracing::{debug, warn};

/// Writes one line per destroyed location to the wrapped writer.
///
/// Callbacks cannot fail, so the first write error is kept and returned by
/// [`finish`](Self::finish). Later events are dropped once writing has
/// failed.
pub struct ReportPrinter<W: Write> {
    out: W,
    error: Option<io::Error>,
    lines: usize,
}

impl<W: Write> ReportPrinter<W> {
    /// Create a printer writing to `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out,
            error: None,
            lines: 0,
        }
    }

    /// Number of event lines written so far.
    pub const fn lines(&self) -> usize {
        self.lines
    }

    /// Flush and hand back the writer, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(error) = self.error {
            return Err(error);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_event(&mut self, event: &DestructionEvent) {
        if self.error.is_some() {
            return;
        }
        match writeln!(self.out, "{event}") {
            Ok(()) => self.lines = self.lines.saturating_add(1),
            Err(error) => {
                warn!(error = %error, "failed to write destruction event");
                self.error = Some(error);
            }
        }
    }
}

impl<W: Write> StepCallback for ReportPrinter<W> {
    fn on_step(&mut self, report: &StepReport) {
        if !report.destroyed.is_empty() {
            debug!(
                step = report.step,
                destroyed = report.destroyed.len(),
                agents_alive = report.agents_alive,
                "reporting destroyed locations"
            );
        }
        for event in &report.destroyed {
            self.write_event(event);
        }
    }
}
