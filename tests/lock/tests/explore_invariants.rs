//! Structural invariants of the move system and the explorer.
//!
//! Proves:
//! 1. Every generated successor stays in range, keeps the adjacency
//!    ordering and is exactly one move deeper than its parent
//! 2. Observer events are monotonic and agree with the final report
//! 3. Pop budgets cut a prefix of the unbudgeted run

use std::collections::BTreeSet;

use moo_kernel::carrier::state::{StateKeyV1, StateV1};
use moo_search::explorer::explore;
use moo_search::observer::{ExploreControl, ExploreObserver, GoalEventV1, ProgressV1};
use moo_search::policy::ExplorePolicyV1;
use moo_search::report::TerminationReasonV1;
use moo_search::transition::generate_successors;

// ---------------------------------------------------------------------------
// 1. Successor invariants
// ---------------------------------------------------------------------------

/// Walk every state reachable within `max_moves` moves, checking each
/// generated successor.
fn walk_successors(bound: u32, max_moves: u64) -> usize {
    let mut seen: BTreeSet<(StateKeyV1, u64)> = BTreeSet::new();
    let mut stack = vec![StateV1::initial(bound)];
    let mut out = Vec::new();

    while let Some(parent) = stack.pop() {
        if parent.total_moves() >= max_moves {
            continue;
        }
        let tally = generate_successors(&parent, &mut out);
        assert_eq!(tally.generated, out.len() as u64);

        for child in out.drain(..) {
            assert_eq!(child.total_moves(), parent.total_moves() + 1);
            assert_eq!(child.magnitudes().len(), bound as usize);
            assert!(child.magnitudes().iter().all(|&m| m <= bound), "{child:?}");
            assert!(child.position() < bound as usize, "{child:?}");
            assert!(child.is_valid_ordering(), "{child:?}");
            assert!(
                child.injection_cycle() == parent.injection_cycle()
                    || child.injection_cycle() == parent.injection_cycle() + 1,
                "{child:?}"
            );
            if seen.insert((child.key().clone(), child.total_moves())) {
                stack.push(child);
            }
        }
    }
    seen.len()
}

#[test]
fn successors_hold_invariants_n2() {
    let visited = walk_successors(2, 200);
    assert!(visited > 100, "walk visited only {visited} states");
}

#[test]
fn successors_hold_invariants_n3() {
    let visited = walk_successors(3, 40);
    assert!(visited > 100, "walk visited only {visited} states");
}

#[test]
fn goals_are_reported_only_for_full_states() {
    for bound in 1..=3 {
        let policy = ExplorePolicyV1 {
            max_pops: Some(500),
            ..ExplorePolicyV1::default()
        };
        let report = explore(bound, &policy, &mut moo_search::observer::NoopObserver).unwrap();
        if let Some(deepest) = &report.deepest_goal {
            assert!(deepest.is_goal());
            assert!(deepest.magnitudes().iter().all(|&m| m == bound));
            assert_eq!(deepest.total_moves(), report.longest_path);
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Observer event monotonicity
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Recorder {
    progress: Vec<ProgressV1>,
    goals: Vec<(u64, u64, u64, u64, bool)>,
}

impl ExploreObserver for Recorder {
    fn on_progress(&mut self, progress: &ProgressV1) -> ExploreControl {
        self.progress.push(*progress);
        ExploreControl::Continue
    }

    fn on_goal(&mut self, event: &GoalEventV1<'_>) -> ExploreControl {
        self.goals.push((
            event.state.total_moves(),
            event.pops,
            event.goals_reached,
            event.longest_path,
            event.is_new_longest,
        ));
        ExploreControl::Continue
    }
}

#[test]
fn observer_events_are_monotonic() {
    let policy = ExplorePolicyV1 {
        max_pops: Some(3_000),
        progress_interval: 100,
        ..ExplorePolicyV1::default()
    };
    let mut recorder = Recorder::default();
    let report = explore(3, &policy, &mut recorder).unwrap();

    // Goal pops skip the progress check, so some multiples may be absent.
    assert!(recorder.progress.len() as u64 <= report.counters.pops / 100);
    assert!(!recorder.progress.is_empty());
    let mut last_pops = 0;
    for p in &recorder.progress {
        assert_eq!(p.pops % 100, 0);
        assert!(p.pops > last_pops);
        assert!(p.known_states <= report.counters.known_states);
        last_pops = p.pops;
    }

    assert_eq!(recorder.goals.len() as u64, report.counters.goals_reached);
    let mut longest = 0;
    for (i, &(depth, pops, goals_reached, longest_path, is_new)) in
        recorder.goals.iter().enumerate()
    {
        assert_eq!(goals_reached, i as u64 + 1);
        assert!(pops <= report.counters.pops);
        assert_eq!(is_new, depth > longest);
        longest = longest.max(depth);
        assert_eq!(longest_path, longest);
    }
    assert_eq!(longest, report.longest_path);
}

// ---------------------------------------------------------------------------
// 3. Budget prefixes
// ---------------------------------------------------------------------------

#[test]
fn pop_budget_cuts_a_prefix() {
    let full = explore(2, &ExplorePolicyV1::default(), &mut moo_search::observer::NoopObserver)
        .unwrap();
    let mut previous_longest = 0;
    for max_pops in [1, 5, 10, 50, 100, 200, 357, 358, 1_000] {
        let policy = ExplorePolicyV1 {
            max_pops: Some(max_pops),
            ..ExplorePolicyV1::default()
        };
        let report = explore(2, &policy, &mut moo_search::observer::NoopObserver).unwrap();
        assert_eq!(report.counters.pops, max_pops.min(full.counters.pops));
        assert!(report.longest_path >= previous_longest);
        assert!(report.longest_path <= full.longest_path);
        previous_longest = report.longest_path;

        if max_pops >= full.counters.pops {
            assert_eq!(report.termination_reason, TerminationReasonV1::FrontierExhausted);
            assert_eq!(report.counters, full.counters);
        } else {
            assert_eq!(report.termination_reason, TerminationReasonV1::PopBudgetExceeded);
        }
    }
}
