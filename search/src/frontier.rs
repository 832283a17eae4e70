//! Depth-first frontier with best-known-depth dominance.
//!
//! Uses a `BTreeMap` keyed by structural identity (not `HashMap`) so that
//! iteration order is deterministic wherever the map is inspected.
//!
//! # Admission rule
//!
//! A candidate is admitted iff the map has no entry for its identity, or the
//! recorded depth is strictly less than the candidate's `total_moves`. On
//! admission the entry is overwritten and the candidate pushed. Entries are
//! never evicted.

use std::collections::BTreeMap;

use moo_kernel::carrier::state::{StateKeyV1, StateV1};

/// Outcome of offering a candidate to the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionV1 {
    /// Recorded and pushed.
    Admitted,
    /// An equal-or-deeper arrival was already recorded.
    Dominated { recorded_depth: u64 },
}

/// LIFO stack plus the best-known-depth map.
#[derive(Debug, Default)]
pub struct DepthFirstFrontier {
    stack: Vec<StateV1>,
    best_depth: BTreeMap<StateKeyV1, u64>,
    high_water: u64,
}

impl DepthFirstFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and push the root unconditionally.
    pub fn seed(&mut self, root: StateV1) {
        self.best_depth
            .insert(root.key().clone(), root.total_moves());
        self.push(root);
    }

    /// Apply the admission rule to `candidate`.
    pub fn offer(&mut self, candidate: StateV1) -> AdmissionV1 {
        let depth = candidate.total_moves();
        match self.best_depth.get_mut(candidate.key()) {
            Some(recorded) if *recorded >= depth => {
                return AdmissionV1::Dominated {
                    recorded_depth: *recorded,
                };
            }
            Some(recorded) => *recorded = depth,
            None => {
                self.best_depth.insert(candidate.key().clone(), depth);
            }
        }
        self.push(candidate);
        AdmissionV1::Admitted
    }

    fn push(&mut self, state: StateV1) {
        self.stack.push(state);
        let size = self.stack.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Pop the most recently pushed state.
    #[must_use]
    pub fn pop(&mut self) -> Option<StateV1> {
        self.stack.pop()
    }

    /// States waiting on the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Distinct identities ever admitted (the map size).
    #[must_use]
    pub fn known_states(&self) -> usize {
        self.best_depth.len()
    }

    /// Deepest recorded arrival at `key`, if any.
    #[must_use]
    pub fn recorded_depth(&self, key: &StateKeyV1) -> Option<u64> {
        self.best_depth.get(key).copied()
    }

    /// Largest stack size observed.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}
