//! Intervals between notes and classification of two-voice motion.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::pitch::{semitone, OCTAVE};
use crate::model::Note;

/// Signed interval in semitones from `a` to `b`; positive when `b` is higher.
#[must_use]
pub fn interval(a: &Note, b: &Note) -> i32 {
    semitone(b).saturating_sub(semitone(a))
}

/// Interval size in semitones regardless of direction.
#[must_use]
pub fn abs_interval(a: &Note, b: &Note) -> u32 {
    interval(a, b).unsigned_abs()
}

/// Interval class (size reduced to within one octave).
fn interval_class(a: &Note, b: &Note) -> u32 {
    abs_interval(a, b) % OCTAVE.unsigned_abs()
}

#[must_use]
pub fn is_perfect_fourth(a: &Note, b: &Note) -> bool {
    interval_class(a, b) == 5
}

#[must_use]
pub fn is_major_third(a: &Note, b: &Note) -> bool {
    interval_class(a, b) == 4
}

#[must_use]
pub fn is_minor_third(a: &Note, b: &Note) -> bool {
    interval_class(a, b) == 3
}

#[must_use]
pub fn is_major_sixth(a: &Note, b: &Note) -> bool {
    interval_class(a, b) == 9
}

#[must_use]
pub fn is_minor_sixth(a: &Note, b: &Note) -> bool {
    interval_class(a, b) == 8
}

/// Perfect fifth, compound fifths included.
#[must_use]
pub fn is_perfect_fifth(a: &Note, b: &Note) -> bool {
    interval_class(a, b) == 7
}

/// Unison or any whole number of octaves.
#[must_use]
pub fn is_octave(a: &Note, b: &Note) -> bool {
    interval_class(a, b) == 0
}

const INTERVAL_NAMES: [&str; 12] = [
    "unison",
    "minor second",
    "major second",
    "minor third",
    "major third",
    "perfect fourth",
    "tritone",
    "perfect fifth",
    "minor sixth",
    "major sixth",
    "minor seventh",
    "major seventh",
];

/// Human-readable name of an interval size, e.g. `19` → `"perfect fifth + 1 octave"`.
#[must_use]
pub fn interval_name(semitones: i32) -> String {
    let size = semitones.unsigned_abs();
    let base = INTERVAL_NAMES[(size % 12) as usize];
    match size / 12 {
        0 => base.to_string(),
        1 => format!("{base} + 1 octave"),
        octaves => format!("{base} + {octaves} octaves"),
    }
}

/// Relative motion of two voices between successive chords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motion {
    /// Neither voice moves.
    Static,
    /// Exactly one voice moves.
    Oblique,
    /// Both voices move in the same direction.
    Parallel,
    /// The voices move in opposite directions.
    Contrary,
}

impl Motion {
    /// Classify from the signed steps each voice takes.
    #[must_use]
    pub const fn from_steps(first: i32, second: i32) -> Self {
        match (first.signum(), second.signum()) {
            (0, 0) => Self::Static,
            (0, _) | (_, 0) => Self::Oblique,
            (a, b) if a == b => Self::Parallel,
            _ => Self::Contrary,
        }
    }
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Static => "static",
            Self::Oblique => "oblique",
            Self::Parallel => "parallel",
            Self::Contrary => "contrary",
        };
        f.write_str(name)
    }
}

/// Classify the motion of voice 1 (`v1_before` → `v1_after`) against voice 2
/// (`v2_before` → `v2_after`).
#[must_use]
pub fn classify_motion(
    v1_before: &Note,
    v1_after: &Note,
    v2_before: &Note,
    v2_after: &Note,
) -> Motion {
    Motion::from_steps(interval(v1_before, v1_after), interval(v2_before, v2_after))
}
