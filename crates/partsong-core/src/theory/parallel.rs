//! Forbidden parallel perfect intervals between two voices.
//!
//! Both tests take the two voices' notes before and after a chord change:
//! voice 1 moves `v1_before` → `v1_after`, voice 2 moves `v2_before` →
//! `v2_after`. The pattern fires only when both vertical intervals are the
//! same perfect consonance and the voices move in [`Motion::Parallel`].

use super::interval::{classify_motion, is_octave, is_perfect_fifth, Motion};
use crate::model::Note;

fn parallel_with(
    v1_before: &Note,
    v1_after: &Note,
    v2_before: &Note,
    v2_after: &Note,
    vertical: fn(&Note, &Note) -> bool,
) -> bool {
    vertical(v1_before, v2_before)
        && vertical(v1_after, v2_after)
        && classify_motion(v1_before, v1_after, v2_before, v2_after) == Motion::Parallel
}

/// Perfect fifth to perfect fifth in parallel motion.
#[must_use]
pub fn has_parallel_fifths(
    v1_before: &Note,
    v1_after: &Note,
    v2_before: &Note,
    v2_after: &Note,
) -> bool {
    parallel_with(v1_before, v1_after, v2_before, v2_after, is_perfect_fifth)
}

/// Octave (or unison) to octave in parallel motion.
#[must_use]
pub fn has_parallel_octaves(
    v1_before: &Note,
    v1_after: &Note,
    v2_before: &Note,
    v2_after: &Note,
) -> bool {
    parallel_with(v1_before, v1_after, v2_before, v2_after, is_octave)
}
