//! `StateV1`: one configuration of the MOO search space.
//!
//! # Layout
//!
//! - `magnitudes`: N per-slot counters, each in `0..=N`
//! - `position`: the active slot, in `0..N`
//! - `since_boost`: small moves since the last large move
//! - `injection_cycle`: injections applied along the path
//! - `total_moves`: depth in the search tree
//!
//! # Equality semantics
//!
//! Identity is structural and lives in [`StateKeyV1`]: lexicographic over
//! `magnitudes`, then `position`, then `since_boost`, then `injection_cycle`.
//! `total_moves` is **not** part of identity. Two arrivals at the same
//! configuration at different depths compare equal, which is what lets the
//! best-known-depth map collapse them.
//!
//! `StateV1` implements `Eq`, `Ord` and `Hash` by delegating to its key.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// Domain prefix for state fingerprints.
pub const DOMAIN_STATE_IDENTITY: HashDomain = HashDomain::StateIdentity;

/// Structural identity of a state (everything except `total_moves`).
///
/// Field order is the comparison order; do not reorder.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateKeyV1 {
    magnitudes: Vec<u32>,
    position: usize,
    since_boost: u64,
    injection_cycle: u64,
}

impl StateKeyV1 {
    /// Per-slot magnitudes.
    #[must_use]
    pub fn magnitudes(&self) -> &[u32] {
        &self.magnitudes
    }

    /// Active slot index.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Consecutive small moves since the last large move.
    #[must_use]
    pub const fn since_boost(&self) -> u64 {
        self.since_boost
    }

    /// Injections applied so far along this path.
    #[must_use]
    pub const fn injection_cycle(&self) -> u64 {
        self.injection_cycle
    }

    /// Canonical identity bytes.
    ///
    /// Encoding (all little-endian): slot count `u32`, each magnitude `u32`,
    /// position `u32`, `since_boost` `u64`, `injection_cycle` `u64`.
    #[must_use]
    pub fn identity_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.magnitudes.len() * 4 + 4 + 16);
        out.extend_from_slice(&slot_count_u32(self.magnitudes.len()).to_le_bytes());
        for m in &self.magnitudes {
            out.extend_from_slice(&m.to_le_bytes());
        }
        out.extend_from_slice(&slot_count_u32(self.position).to_le_bytes());
        out.extend_from_slice(&self.since_boost.to_le_bytes());
        out.extend_from_slice(&self.injection_cycle.to_le_bytes());
        out
    }

    /// `canonical_hash(StateIdentity, identity_bytes)`.
    #[must_use]
    pub fn fingerprint(&self) -> ContentHash {
        canonical_hash(DOMAIN_STATE_IDENTITY, &self.identity_bytes())
    }
}

/// Slot counts and positions are bounded by `u32` bounds at construction.
fn slot_count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// One point in the search space: identity plus depth.
///
/// States are never mutated once they are handed to a frontier. The
/// `raise`/`lower`/... primitives exist for building a successor on a
/// fresh clone of its parent.
#[derive(Debug, Clone)]
pub struct StateV1 {
    key: StateKeyV1,
    total_moves: u64,
}

impl StateV1 {
    /// The all-zero initial configuration for bound N.
    ///
    /// N is both the slot count and the per-slot cap. Callers validate
    /// N >= 1; a zero bound yields an empty (vacuously goal) state.
    #[must_use]
    pub fn initial(bound: u32) -> Self {
        Self {
            key: StateKeyV1 {
                magnitudes: vec![0; bound as usize],
                position: 0,
                since_boost: 0,
                injection_cycle: 0,
            },
            total_moves: 0,
        }
    }

    /// Build a state from raw parts.
    ///
    /// Returns `None` if the parts violate the range invariants
    /// (`magnitudes[i] <= N`, `position < N`). The ordering invariant is not
    /// checked here; use [`StateV1::is_valid_ordering`].
    #[must_use]
    pub fn from_parts(
        magnitudes: Vec<u32>,
        position: usize,
        since_boost: u64,
        injection_cycle: u64,
        total_moves: u64,
    ) -> Option<Self> {
        let bound = u32::try_from(magnitudes.len()).ok()?;
        if position >= magnitudes.len() || magnitudes.iter().any(|&m| m > bound) {
            return None;
        }
        Some(Self {
            key: StateKeyV1 {
                magnitudes,
                position,
                since_boost,
                injection_cycle,
            },
            total_moves,
        })
    }

    /// Structural identity (the best-known-depth map key).
    #[must_use]
    pub const fn key(&self) -> &StateKeyV1 {
        &self.key
    }

    /// N: slot count and per-slot cap.
    #[must_use]
    pub fn bound(&self) -> u32 {
        slot_count_u32(self.key.magnitudes.len())
    }

    #[must_use]
    pub fn magnitudes(&self) -> &[u32] {
        &self.key.magnitudes
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.key.position
    }

    #[must_use]
    pub const fn since_boost(&self) -> u64 {
        self.key.since_boost
    }

    #[must_use]
    pub const fn injection_cycle(&self) -> u64 {
        self.key.injection_cycle
    }

    /// Depth in the search tree. Not part of identity.
    #[must_use]
    pub const fn total_moves(&self) -> u64 {
        self.total_moves
    }

    /// Goal: every slot has reached the bound.
    #[must_use]
    pub fn is_goal(&self) -> bool {
        let bound = self.bound();
        self.key.magnitudes.iter().all(|&m| m >= bound)
    }

    /// Adjacency invariant: a non-zero slot may exceed its left neighbor by
    /// at most one.
    #[must_use]
    pub fn is_valid_ordering(&self) -> bool {
        self.key
            .magnitudes
            .windows(2)
            .all(|pair| pair[1] == 0 || pair[0] >= pair[1] - 1)
    }

    /// Replace every magnitude `m` with `N - m`.
    pub fn apply_flip(&mut self) {
        let bound = self.bound();
        for m in &mut self.key.magnitudes {
            *m = bound - *m;
        }
    }

    /// Add `amount` to slot `index`, saturating at the bound.
    pub fn raise(&mut self, index: usize, amount: u32) {
        let bound = self.bound();
        let slot = &mut self.key.magnitudes[index];
        *slot = slot.saturating_add(amount).min(bound);
    }

    /// Subtract `amount` from slot `index`, floored at zero.
    pub fn lower(&mut self, index: usize, amount: u32) {
        let slot = &mut self.key.magnitudes[index];
        *slot = slot.saturating_sub(amount);
    }

    /// Raise every slot by one (capped) and count the injection.
    pub fn inject(&mut self) {
        for index in 0..self.key.magnitudes.len() {
            self.raise(index, 1);
        }
        self.key.injection_cycle += 1;
    }

    /// Move the active slot.
    ///
    /// # Panics
    ///
    /// Panics if `position` is not a valid slot index.
    pub fn set_position(&mut self, position: usize) {
        assert!(
            position < self.key.magnitudes.len(),
            "position {position} out of range for {} slots",
            self.key.magnitudes.len()
        );
        self.key.position = position;
    }

    /// Record one more small move since the last large move.
    pub fn count_small_move(&mut self) {
        self.key.since_boost += 1;
    }

    /// Reset the small-move counter after a large move.
    pub fn reset_since_boost(&mut self) {
        self.key.since_boost = 0;
    }

    /// Increment the move counter.
    pub fn advance_move(&mut self) {
        self.total_moves += 1;
    }

    /// Render as a JSON object (integers only, canonicalizable).
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "injection_cycle": self.key.injection_cycle,
            "magnitudes": self.key.magnitudes,
            "position": self.key.position,
            "since_boost": self.key.since_boost,
            "total_moves": self.total_moves,
        })
    }
}

impl PartialEq for StateV1 {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for StateV1 {}

impl PartialOrd for StateV1 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StateV1 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Hash for StateV1 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl std::fmt::Display for StateV1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "pos={} moves={} since_boost={} cycle={} mag={:?}",
            self.key.position,
            self.total_moves,
            self.key.since_boost,
            self.key.injection_cycle,
            self.key.magnitudes
        )
    }
}
