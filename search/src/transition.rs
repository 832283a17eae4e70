//! Successor generation for one popped state.
//!
//! # Order
//!
//! Small-move branches first, then large-move branches. Within each kind,
//! destination positions ascend. The explorer pushes successors in this
//! order, so the last one generated is the first one popped.
//!
//! Every branch applies, in order: the move to the current slot, the
//! position change, the move counter, the periodic effects, and finally
//! the ordering check. Branches that fail the check are dropped and
//! counted.

use moo_kernel::carrier::state::StateV1;

use crate::effects::{apply_periodic_effects, apply_trigger};

/// Small moves required since the last large move before a large move is
/// offered.
pub const LARGE_MOVE_MIN_SINCE_BOOST: u64 = 2;

/// The two kinds of move applied at the active slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKindV1 {
    /// +1 at the active slot; counts toward the next large move.
    Small,
    /// +2 at the active slot, then the trigger; resets the counter.
    Large,
}

impl MoveKindV1 {
    /// Amount added to the active slot (before capping).
    #[must_use]
    pub const fn step(self) -> u32 {
        match self {
            Self::Small => 1,
            Self::Large => 2,
        }
    }

    /// Whether this kind of move is available from `state`.
    #[must_use]
    pub const fn is_available(self, state: &StateV1) -> bool {
        match self {
            Self::Small => true,
            Self::Large => state.since_boost() >= LARGE_MOVE_MIN_SINCE_BOOST,
        }
    }
}

/// Destination positions reachable from one slot, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors {
    slots: [usize; 2],
    len: usize,
}

impl Neighbors {
    /// Neighbors of `position` among `slot_count` slots.
    ///
    /// Interior slots reach both sides, end slots reach their single
    /// neighbor, and a lone slot reaches only itself.
    #[must_use]
    pub const fn of(position: usize, slot_count: usize) -> Self {
        if slot_count <= 1 {
            Self {
                slots: [position, 0],
                len: 1,
            }
        } else if position == 0 {
            Self {
                slots: [1, 0],
                len: 1,
            }
        } else if position + 1 >= slot_count {
            Self {
                slots: [slot_count - 2, 0],
                len: 1,
            }
        } else {
            Self {
                slots: [position - 1, position + 1],
                len: 2,
            }
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.slots[..self.len]
    }
}

/// Per-expansion counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionTallyV1 {
    /// Successors that passed the ordering check.
    pub generated: u64,
    /// Branches dropped by the ordering check.
    pub pruned_by_ordering: u64,
}

/// Generate every valid successor of `parent` into `out` (cleared first).
pub fn generate_successors(parent: &StateV1, out: &mut Vec<StateV1>) -> ExpansionTallyV1 {
    out.clear();
    let mut tally = ExpansionTallyV1::default();
    let neighbors = Neighbors::of(parent.position(), parent.magnitudes().len());

    for kind in [MoveKindV1::Small, MoveKindV1::Large] {
        if !kind.is_available(parent) {
            continue;
        }
        let staged = stage_move(parent, kind);
        for &next in neighbors.as_slice() {
            let mut child = staged.clone();
            child.set_position(next);
            child.advance_move();
            apply_periodic_effects(&mut child);
            if child.is_valid_ordering() {
                out.push(child);
                tally.generated += 1;
            } else {
                tally.pruned_by_ordering += 1;
            }
        }
    }
    tally
}

/// Apply `kind` at the parent's active slot, before any movement.
fn stage_move(parent: &StateV1, kind: MoveKindV1) -> StateV1 {
    let mut staged = parent.clone();
    staged.raise(parent.position(), kind.step());
    match kind {
        MoveKindV1::Small => staged.count_small_move(),
        MoveKindV1::Large => {
            apply_trigger(&mut staged);
            staged.reset_since_boost();
        }
    }
    staged
}
