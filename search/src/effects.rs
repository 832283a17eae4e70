//! Move-count-driven effects: periodic flip, periodic injection, and the
//! trigger applied after a large move.
//!
//! All functions mutate a fresh successor in place; parents are never
//! touched.

use moo_kernel::carrier::state::StateV1;

/// Flip period at the start of a path.
pub const BASE_FLIP_PERIOD: u64 = 4;
/// Every this many moves the flip period grows by one.
pub const FLIP_PERIOD_STRETCH: u64 = 50_000;
/// The flip period never exceeds this.
pub const MAX_FLIP_PERIOD: u64 = 100;
/// Injection fires on every positive multiple of this move count.
pub const INJECTION_PERIOD: u64 = 131;

/// `min(100, 4 + total_moves / 50_000)`.
#[must_use]
pub const fn flip_period(total_moves: u64) -> u64 {
    let period = BASE_FLIP_PERIOD + total_moves / FLIP_PERIOD_STRETCH;
    if period > MAX_FLIP_PERIOD {
        MAX_FLIP_PERIOD
    } else {
        period
    }
}

/// Flip fires when `total_moves mod period == 1`.
#[must_use]
pub const fn flip_due(total_moves: u64) -> bool {
    total_moves % flip_period(total_moves) == 1
}

/// Injection fires on positive multiples of [`INJECTION_PERIOD`].
#[must_use]
pub const fn injection_due(total_moves: u64) -> bool {
    total_moves > 0 && total_moves % INJECTION_PERIOD == 0
}

/// Apply the periodic effects for the state's (already advanced) move count.
///
/// Flip is evaluated before injection; both may fire on the same move.
pub fn apply_periodic_effects(state: &mut StateV1) {
    let total_moves = state.total_moves();
    if flip_due(total_moves) {
        state.apply_flip();
    }
    if injection_due(total_moves) {
        state.inject();
    }
}

/// Trigger applied after the +2 of a large move.
///
/// Max and min are both taken from the array as it stands on entry. The
/// first slot holding the max is lowered by one. The already-lowered array
/// is then scanned for the first slot holding the *entry* min, which is
/// raised by one. If the lowering removed the only slot with that value,
/// nothing is raised.
pub fn apply_trigger(state: &mut StateV1) {
    let mags = state.magnitudes();
    let (Some(&max), Some(&min)) = (mags.iter().max(), mags.iter().min()) else {
        return;
    };
    if let Some(index) = mags.iter().position(|&m| m == max) {
        state.lower(index, 1);
    }
    if let Some(index) = state.magnitudes().iter().position(|&m| m == min) {
        state.raise(index, 1);
    }
}
