//! Shared helpers for the explorer benchmark suites.

#![forbid(unsafe_code)]

use moo_harness::config::RunConfig;
use moo_kernel::carrier::state::StateV1;
use moo_search::explorer::explore;
use moo_search::observer::NoopObserver;
use moo_search::policy::ExplorePolicyV1;
use moo_search::report::ExploreReportV1;
use moo_search::transition::generate_successors;

/// A named bound plus policy, exercising one termination path.
#[derive(Debug, Clone)]
pub struct Regime {
    pub name: &'static str,
    pub bound: u32,
    pub policy: ExplorePolicyV1,
}

impl Regime {
    /// The harness configuration for this regime.
    #[must_use]
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            max_pops: self.policy.max_pops,
            max_known_states: self.policy.max_known_states,
            progress_interval: self.policy.progress_interval,
            ..RunConfig::new(self.bound)
        }
    }
}

/// Regimes covering exhaustion and both budget stops.
#[must_use]
pub fn regimes() -> Vec<Regime> {
    vec![
        Regime {
            name: "exhaustive_n2",
            bound: 2,
            policy: ExplorePolicyV1::default(),
        },
        Regime {
            name: "pop_budget_n3",
            bound: 3,
            policy: ExplorePolicyV1 {
                max_pops: Some(20_000),
                ..ExplorePolicyV1::default()
            },
        },
        Regime {
            name: "known_state_budget_n3",
            bound: 3,
            policy: ExplorePolicyV1 {
                max_known_states: Some(2_000),
                ..ExplorePolicyV1::default()
            },
        },
        Regime {
            name: "pop_budget_n5",
            bound: 5,
            policy: ExplorePolicyV1 {
                max_pops: Some(20_000),
                ..ExplorePolicyV1::default()
            },
        },
    ]
}

/// Run the explorer alone, without canonicalization or bundling.
///
/// # Panics
///
/// Panics if the regime is rejected. Benchmark regimes are valid by
/// construction.
#[must_use]
pub fn explore_only(regime: &Regime) -> ExploreReportV1 {
    explore(regime.bound, &regime.policy, &mut NoopObserver)
        .expect("benchmark regime should be valid")
}

/// Collect `count` states reachable from the initial state of `bound`,
/// in depth-first order. Used as expansion inputs for micro benchmarks.
#[must_use]
pub fn sample_states(bound: u32, count: usize) -> Vec<StateV1> {
    let mut samples = Vec::with_capacity(count);
    let mut stack = vec![StateV1::initial(bound)];
    let mut out = Vec::new();
    while samples.len() < count {
        let Some(state) = stack.pop() else {
            break;
        };
        generate_successors(&state, &mut out);
        stack.append(&mut out);
        samples.push(state);
    }
    samples
}
