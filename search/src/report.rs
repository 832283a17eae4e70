//! `ExploreReportV1`: the auditable result of one exploration.
//!
//! The report is always produced once pre-flight validation passes,
//! whatever the termination reason. It serializes to canonical JSON and is
//! content-addressed under the `ExploreReport` hash domain.

use moo_kernel::carrier::state::StateV1;
use moo_kernel::proof::canon::{canonical_json_bytes, CanonError};
use moo_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::policy::ExplorePolicyV1;

/// Domain prefix for report digests.
pub const DOMAIN_EXPLORE_REPORT: HashDomain = HashDomain::ExploreReport;

/// The complete exploration result.
#[derive(Debug, Clone)]
pub struct ExploreReportV1 {
    /// N.
    pub bound: u32,
    /// Largest `total_moves` over goals reached (0 if none).
    pub longest_path: u64,
    pub termination_reason: TerminationReasonV1,
    pub counters: ExploreCountersV1,
    /// Fingerprint of the all-zero initial state.
    pub root_fingerprint: ContentHash,
    /// First goal reached at `longest_path` moves.
    pub deepest_goal: Option<StateV1>,
    /// Policy echo.
    pub policy: ExplorePolicyV1,
}

/// Counters accumulated by the loop.
///
/// `admitted + dominated == successors_generated` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExploreCountersV1 {
    pub pops: u64,
    pub expansions: u64,
    pub goals_reached: u64,
    pub successors_generated: u64,
    pub pruned_by_ordering: u64,
    pub admitted: u64,
    pub dominated: u64,
    pub known_states: u64,
    pub frontier_high_water: u64,
    pub frontier_remaining: u64,
}

/// Why the exploration stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// Every admitted state was popped.
    FrontierExhausted,
    /// `max_pops` was reached.
    PopBudgetExceeded,
    /// The known-state map grew past `max_known_states`.
    KnownStateBudgetExceeded,
    /// An observer callback returned `Stop`.
    StoppedByObserver { stage: ObserverStageV1 },
    /// An observer callback panicked.
    ObserverPanicked { stage: ObserverStageV1 },
}

impl TerminationReasonV1 {
    /// Stable snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FrontierExhausted => "frontier_exhausted",
            Self::PopBudgetExceeded => "pop_budget_exceeded",
            Self::KnownStateBudgetExceeded => "known_state_budget_exceeded",
            Self::StoppedByObserver { .. } => "stopped_by_observer",
            Self::ObserverPanicked { .. } => "observer_panicked",
        }
    }

    /// True only for a run that explored the whole reachable space.
    #[must_use]
    pub const fn is_exhaustive(self) -> bool {
        matches!(self, Self::FrontierExhausted)
    }
}

impl std::fmt::Display for TerminationReasonV1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StoppedByObserver { stage } | Self::ObserverPanicked { stage } => {
                write!(f, "{}:{}", self.as_str(), stage.as_str())
            }
            _ => f.write_str(self.as_str()),
        }
    }
}

/// Which observer callback was running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverStageV1 {
    Progress,
    Goal,
}

impl ObserverStageV1 {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Progress => "on_progress",
            Self::Goal => "on_goal",
        }
    }
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl ExploreReportV1 {
    /// Whether some goal was reached at a positive depth.
    #[must_use]
    pub fn reached_goal(&self) -> bool {
        self.deepest_goal.is_some()
    }

    /// Serialize to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// `canonical_hash(ExploreReport, canonical_json_bytes)`.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(
            DOMAIN_EXPLORE_REPORT,
            &self.to_canonical_json_bytes()?,
        ))
    }

    /// Convert to a `serde_json::Value` for canonical serialization.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let deepest_goal = self.deepest_goal.as_ref().map(|state| {
            serde_json::json!({
                "fingerprint": state.key().fingerprint().as_str(),
                "state": state.to_json_value(),
            })
        });
        serde_json::json!({
            "bound": self.bound,
            "counters": counters_to_json(&self.counters),
            "deepest_goal": deepest_goal,
            "longest_path": self.longest_path,
            "policy": self.policy.to_json_value(),
            "root_fingerprint": self.root_fingerprint.as_str(),
            "schema_version": "explore_report.v1",
            "termination_reason": termination_reason_to_json(self.termination_reason),
        })
    }
}

fn counters_to_json(c: &ExploreCountersV1) -> serde_json::Value {
    serde_json::json!({
        "admitted": c.admitted,
        "dominated": c.dominated,
        "expansions": c.expansions,
        "frontier_high_water": c.frontier_high_water,
        "frontier_remaining": c.frontier_remaining,
        "goals_reached": c.goals_reached,
        "known_states": c.known_states,
        "pops": c.pops,
        "pruned_by_ordering": c.pruned_by_ordering,
        "successors_generated": c.successors_generated,
    })
}

fn termination_reason_to_json(r: TerminationReasonV1) -> serde_json::Value {
    match r {
        TerminationReasonV1::StoppedByObserver { stage }
        | TerminationReasonV1::ObserverPanicked { stage } => {
            serde_json::json!({"stage": stage.as_str(), "type": r.as_str()})
        }
        _ => serde_json::json!({"type": r.as_str()}),
    }
}
