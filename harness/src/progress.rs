//! `ProgressLines`: an observer that writes one `key=value` line per event.
//!
//! Line formats:
//!
//! ```text
//! event=progress pops=50 frontier=8 depth=32 known_states=28
//! event=goal pops=9 depth=8 goals_reached=1 longest_path=8 new_longest=true
//! ```
//!
//! A failed write never stops the exploration. The first write error is
//! kept and can be inspected afterwards.

use std::io::Write;

use moo_search::observer::{ExploreControl, ExploreObserver, GoalEventV1, ProgressV1};

/// Writes exploration events to `W` as `key=value` lines.
#[derive(Debug)]
pub struct ProgressLines<W: Write> {
    out: W,
    lines_written: u64,
    write_error: Option<String>,
}

impl<W: Write> ProgressLines<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            lines_written: 0,
            write_error: None,
        }
    }

    /// Lines successfully written so far.
    #[must_use]
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// The first write failure, if any.
    #[must_use]
    pub fn write_error(&self) -> Option<&str> {
        self.write_error.as_deref()
    }

    /// Recover the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: &str) {
        match writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            Ok(()) => self.lines_written += 1,
            Err(e) => {
                if self.write_error.is_none() {
                    self.write_error = Some(e.to_string());
                }
            }
        }
    }
}

impl<W: Write> ExploreObserver for ProgressLines<W> {
    fn on_progress(&mut self, progress: &ProgressV1) -> ExploreControl {
        self.emit(&format!(
            "event=progress pops={} frontier={} depth={} known_states={}",
            progress.pops, progress.frontier_len, progress.depth, progress.known_states
        ));
        ExploreControl::Continue
    }

    fn on_goal(&mut self, event: &GoalEventV1<'_>) -> ExploreControl {
        self.emit(&format!(
            "event=goal pops={} depth={} goals_reached={} longest_path={} new_longest={}",
            event.pops,
            event.state.total_moves(),
            event.goals_reached,
            event.longest_path,
            event.is_new_longest
        ));
        ExploreControl::Continue
    }
}
