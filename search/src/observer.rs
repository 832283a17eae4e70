//! Observer seam for progress and goal notifications.
//!
//! Observers are purely observational: they see snapshots, never the
//! frontier, and can only ask the explorer to stop.
//!
//! # Contract
//!
//! - Callbacks run synchronously on the exploring thread, in pop order.
//! - A `Stop` verdict ends the run with
//!   `TerminationReasonV1::StoppedByObserver`; the report is still produced.
//! - A panicking callback ends the run with
//!   `TerminationReasonV1::ObserverPanicked`.

use moo_kernel::carrier::state::StateV1;

/// Verdict returned by every observer callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExploreControl {
    Continue,
    Stop,
}

/// Periodic progress snapshot, taken after a non-goal pop and before its
/// expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressV1 {
    /// Pops so far, including the current one.
    pub pops: u64,
    /// States left on the stack after the pop.
    pub frontier_len: u64,
    /// `total_moves` of the popped state.
    pub depth: u64,
    /// Distinct identities recorded so far.
    pub known_states: u64,
}

/// A goal state was popped.
#[derive(Debug, Clone, Copy)]
pub struct GoalEventV1<'a> {
    /// The goal state itself.
    pub state: &'a StateV1,
    /// Pops so far, including this one.
    pub pops: u64,
    /// Goals reached so far, including this one.
    pub goals_reached: u64,
    /// Longest path after accounting for this goal.
    pub longest_path: u64,
    /// Whether this goal set a new longest path.
    pub is_new_longest: bool,
}

/// Receives exploration notifications.
pub trait ExploreObserver {
    /// Called every `progress_interval` pops.
    fn on_progress(&mut self, _progress: &ProgressV1) -> ExploreControl {
        ExploreControl::Continue
    }

    /// Called for every goal popped.
    fn on_goal(&mut self, _event: &GoalEventV1<'_>) -> ExploreControl {
        ExploreControl::Continue
    }
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ExploreObserver for NoopObserver {}
