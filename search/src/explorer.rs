//! Exploration entry points and the depth-first loop.

use std::panic::{catch_unwind, AssertUnwindSafe};

use moo_kernel::carrier::state::StateV1;

use crate::error::ExploreError;
use crate::frontier::{AdmissionV1, DepthFirstFrontier};
use crate::observer::{ExploreControl, ExploreObserver, GoalEventV1, NoopObserver, ProgressV1};
use crate::policy::ExplorePolicyV1;
use crate::report::{ExploreCountersV1, ExploreReportV1, ObserverStageV1, TerminationReasonV1};
use crate::transition::generate_successors;

/// Longest path to a goal for bound `bound`, exploring exhaustively.
///
/// Equivalent to [`explore`] with the default policy and no observer.
///
/// # Errors
///
/// Returns [`ExploreError::BoundTooSmall`] if `bound < 1`.
pub fn compute_longest_path(bound: u32) -> Result<u64, ExploreError> {
    explore(bound, &ExplorePolicyV1::default(), &mut NoopObserver).map(|r| r.longest_path)
}

/// Run a dominance-pruned depth-first exploration from the all-zero state.
///
/// Every runtime termination (exhaustion, budgets, observer stop, observer
/// panic) returns `Ok` with a complete report. Check
/// `report.termination_reason` to tell them apart.
///
/// # Per-pop order
///
/// 1. Empty frontier ends the run (`FrontierExhausted`).
/// 2. `pops >= max_pops` ends the run (`PopBudgetExceeded`).
/// 3. Pop; count it.
/// 4. Goal: count, record if strictly deeper, notify `on_goal`, do not expand.
/// 5. Every `progress_interval` pops: notify `on_progress`.
/// 6. Expand and offer each successor to the frontier.
/// 7. More than `max_known_states` identities ends the run
///    (`KnownStateBudgetExceeded`).
///
/// # Errors
///
/// Pre-flight only: [`ExploreError::BoundTooSmall`] for `bound < 1`,
/// [`ExploreError::InvalidPolicy`] for a zero progress interval.
pub fn explore(
    bound: u32,
    policy: &ExplorePolicyV1,
    observer: &mut dyn ExploreObserver,
) -> Result<ExploreReportV1, ExploreError> {
    if bound < 1 {
        return Err(ExploreError::BoundTooSmall { bound });
    }
    policy.validate()?;

    let root = StateV1::initial(bound);
    let root_fingerprint = root.key().fingerprint();

    let mut frontier = DepthFirstFrontier::new();
    frontier.seed(root);

    let mut counters = ExploreCountersV1::default();
    let mut longest_path: u64 = 0;
    let mut deepest_goal: Option<StateV1> = None;
    let mut successors: Vec<StateV1> = Vec::new();

    let termination_reason = loop {
        if frontier.is_empty() {
            break TerminationReasonV1::FrontierExhausted;
        }
        if policy.max_pops.is_some_and(|max| counters.pops >= max) {
            break TerminationReasonV1::PopBudgetExceeded;
        }

        let Some(current) = frontier.pop() else {
            break TerminationReasonV1::FrontierExhausted;
        };
        counters.pops += 1;

        if current.is_goal() {
            counters.goals_reached += 1;
            let is_new_longest = current.total_moves() > longest_path;
            if is_new_longest {
                longest_path = current.total_moves();
                deepest_goal = Some(current.clone());
            }
            let event = GoalEventV1 {
                state: &current,
                pops: counters.pops,
                goals_reached: counters.goals_reached,
                longest_path,
                is_new_longest,
            };
            if let Some(reason) = notify(ObserverStageV1::Goal, || observer.on_goal(&event)) {
                break reason;
            }
            continue;
        }

        if counters.pops % policy.progress_interval == 0 {
            let progress = ProgressV1 {
                pops: counters.pops,
                frontier_len: frontier.len() as u64,
                depth: current.total_moves(),
                known_states: frontier.known_states() as u64,
            };
            if let Some(reason) =
                notify(ObserverStageV1::Progress, || observer.on_progress(&progress))
            {
                break reason;
            }
        }

        counters.expansions += 1;
        let tally = generate_successors(&current, &mut successors);
        counters.successors_generated += tally.generated;
        counters.pruned_by_ordering += tally.pruned_by_ordering;
        for child in successors.drain(..) {
            match frontier.offer(child) {
                AdmissionV1::Admitted => counters.admitted += 1,
                AdmissionV1::Dominated { .. } => counters.dominated += 1,
            }
        }

        if policy
            .max_known_states
            .is_some_and(|max| frontier.known_states() as u64 > max)
        {
            break TerminationReasonV1::KnownStateBudgetExceeded;
        }
    };

    counters.known_states = frontier.known_states() as u64;
    counters.frontier_high_water = frontier.high_water();
    counters.frontier_remaining = frontier.len() as u64;

    Ok(ExploreReportV1 {
        bound,
        longest_path,
        termination_reason,
        counters,
        root_fingerprint,
        deepest_goal,
        policy: policy.clone(),
    })
}

/// Run one observer callback; `Some` means the run must end.
fn notify(
    stage: ObserverStageV1,
    callback: impl FnOnce() -> ExploreControl,
) -> Option<TerminationReasonV1> {
    match catch_unwind(AssertUnwindSafe(callback)) {
        Ok(ExploreControl::Continue) => None,
        Ok(ExploreControl::Stop) => Some(TerminationReasonV1::StoppedByObserver { stage }),
        Err(_) => Some(TerminationReasonV1::ObserverPanicked { stage }),
    }
}
