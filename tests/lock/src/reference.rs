//! Reference values the explorer is locked to.
//!
//! Each case fixes the bound, the policy and every counter of the
//! resulting report. Any change to successor order, effects, or the
//! admission rule moves at least one of these numbers.

use moo_search::policy::ExplorePolicyV1;
use moo_search::report::{ExploreCountersV1, TerminationReasonV1};

/// One locked exploration.
#[derive(Debug, Clone)]
pub struct ReferenceCase {
    pub name: &'static str,
    pub bound: u32,
    pub policy: ExplorePolicyV1,
    pub longest_path: u64,
    pub termination_reason: TerminationReasonV1,
    pub counters: ExploreCountersV1,
}

/// All locked cases, cheapest first.
#[must_use]
pub fn reference_cases() -> Vec<ReferenceCase> {
    vec![
        ReferenceCase {
            name: "n1_exhaustive",
            bound: 1,
            policy: ExplorePolicyV1::default(),
            longest_path: 2,
            termination_reason: TerminationReasonV1::FrontierExhausted,
            counters: ExploreCountersV1 {
                pops: 3,
                expansions: 2,
                goals_reached: 1,
                successors_generated: 2,
                pruned_by_ordering: 0,
                admitted: 2,
                dominated: 0,
                known_states: 3,
                frontier_high_water: 1,
                frontier_remaining: 0,
            },
        },
        ReferenceCase {
            name: "n2_exhaustive",
            bound: 2,
            policy: ExplorePolicyV1::default(),
            longest_path: 131,
            termination_reason: TerminationReasonV1::FrontierExhausted,
            counters: ExploreCountersV1 {
                pops: 358,
                expansions: 320,
                goals_reached: 38,
                successors_generated: 507,
                pruned_by_ordering: 16,
                admitted: 357,
                dominated: 150,
                known_states: 155,
                frontier_high_water: 33,
                frontier_remaining: 0,
            },
        },
        ReferenceCase {
            name: "n2_pop_budget_10",
            bound: 2,
            policy: ExplorePolicyV1 {
                max_pops: Some(10),
                ..ExplorePolicyV1::default()
            },
            longest_path: 8,
            termination_reason: TerminationReasonV1::PopBudgetExceeded,
            counters: ExploreCountersV1 {
                pops: 10,
                expansions: 9,
                goals_reached: 1,
                successors_generated: 12,
                pruned_by_ordering: 0,
                admitted: 12,
                dominated: 0,
                known_states: 13,
                frontier_high_water: 3,
                frontier_remaining: 3,
            },
        },
        ReferenceCase {
            name: "n3_pop_budget_1000",
            bound: 3,
            policy: ExplorePolicyV1 {
                max_pops: Some(1000),
                ..ExplorePolicyV1::default()
            },
            longest_path: 656,
            termination_reason: TerminationReasonV1::PopBudgetExceeded,
            counters: ExploreCountersV1 {
                pops: 1000,
                expansions: 992,
                goals_reached: 8,
                successors_generated: 1602,
                pruned_by_ordering: 450,
                admitted: 1601,
                dominated: 1,
                known_states: 358,
                frontier_high_water: 602,
                frontier_remaining: 602,
            },
        },
        ReferenceCase {
            name: "n3_known_state_budget_500",
            bound: 3,
            policy: ExplorePolicyV1 {
                max_known_states: Some(500),
                ..ExplorePolicyV1::default()
            },
            longest_path: 920,
            termination_reason: TerminationReasonV1::KnownStateBudgetExceeded,
            counters: ExploreCountersV1 {
                pops: 1520,
                expansions: 1508,
                goals_reached: 12,
                successors_generated: 2434,
                pruned_by_ordering: 686,
                admitted: 2433,
                dominated: 1,
                known_states: 502,
                frontier_high_water: 914,
                frontier_remaining: 914,
            },
        },
    ]
}
