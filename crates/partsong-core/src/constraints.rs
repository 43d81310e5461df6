//! Exercise constraints: which chord labels a progression must use, which it
//! may not use, and how long it may be.
//!
//! Constraints only look at chord labels and chord count. Unlabelled chords
//! neither satisfy a requirement nor break a prohibition.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::exercise::ExerciseConstraints;
use crate::model::{Chord, ChordProgression};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Required,
    Forbidden,
    Length,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Required => "required",
            Self::Forbidden => "forbidden",
            Self::Length => "length",
        };
        write!(f, "{s}")
    }
}

/// One unmet constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    pub kind: ViolationKind,
    pub message: String,
    /// Chord labels involved; empty for length violations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_chords: Vec<String>,
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintReport {
    pub violations: Vec<ConstraintViolation>,
}

impl ConstraintReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Keep the first occurrence of each label.
fn dedup<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for label in labels {
        if !seen.iter().any(|s| s == label) {
            seen.push(label.to_string());
        }
    }
    seen
}

/// A zero bound is treated as unset.
fn bound(value: Option<usize>) -> Option<usize> {
    value.filter(|&n| n > 0)
}

/// Check a progression against an exercise's constraints.
///
/// Produces at most one `Required` and one `Forbidden` violation, and one
/// `Length` violation per bound exceeded. No constraints means valid.
#[must_use]
pub fn validate_constraints(
    progression: &ChordProgression,
    constraints: Option<&ExerciseConstraints>,
) -> ConstraintReport {
    let Some(constraints) = constraints else {
        return ConstraintReport::default();
    };

    let mut violations = Vec::new();
    let used: Vec<&str> = progression.labels().collect();

    let missing = dedup(
        constraints
            .required_chords
            .iter()
            .map(String::as_str)
            .filter(|required| !used.contains(required)),
    );
    if !missing.is_empty() {
        violations.push(ConstraintViolation {
            kind: ViolationKind::Required,
            message: format!("missing required chord(s): {}", missing.join(", ")),
            related_chords: missing,
        });
    }

    let forbidden = dedup(
        used.iter()
            .copied()
            .filter(|label| constraints.forbidden_chords.iter().any(|f| f == label)),
    );
    if !forbidden.is_empty() {
        violations.push(ConstraintViolation {
            kind: ViolationKind::Forbidden,
            message: format!("uses forbidden chord(s): {}", forbidden.join(", ")),
            related_chords: forbidden,
        });
    }

    let length = progression.len();
    if let Some(min) = bound(constraints.min_length) {
        if length < min {
            violations.push(ConstraintViolation {
                kind: ViolationKind::Length,
                message: format!("too few chords: at least {min} required, got {length}"),
                related_chords: Vec::new(),
            });
        }
    }
    if let Some(max) = bound(constraints.max_length) {
        if length > max {
            violations.push(ConstraintViolation {
                kind: ViolationKind::Length,
                message: format!("too many chords: at most {max} allowed, got {length}"),
                related_chords: Vec::new(),
            });
        }
    }

    ConstraintReport { violations }
}

/// A progression can be submitted once it has exactly the expected number of
/// chords and meets every constraint.
#[must_use]
pub fn can_submit_progression(
    progression: &ChordProgression,
    constraints: Option<&ExerciseConstraints>,
    expected_length: usize,
) -> bool {
    progression.len() == expected_length
        && validate_constraints(progression, constraints).is_valid()
}

#[must_use]
pub fn is_chord_forbidden(chord: &Chord, constraints: Option<&ExerciseConstraints>) -> bool {
    match (chord.label(), constraints) {
        (Some(label), Some(c)) => c.forbidden_chords.iter().any(|f| f == label),
        _ => false,
    }
}

#[must_use]
pub fn is_chord_required(chord: &Chord, constraints: Option<&ExerciseConstraints>) -> bool {
    match (chord.label(), constraints) {
        (Some(label), Some(c)) => c.required_chords.iter().any(|r| r == label),
        _ => false,
    }
}

/// The labels from `all` that are not forbidden, in their original order.
#[must_use]
pub fn available_chords<'a>(
    all: &[&'a str],
    constraints: Option<&ExerciseConstraints>,
) -> Vec<&'a str> {
    all.iter()
        .copied()
        .filter(|label| !constraints.is_some_and(|c| c.forbidden_chords.iter().any(|f| f == label)))
        .collect()
}

/// Human-readable reminders of what an exercise asks for.
#[must_use]
pub fn constraint_hints(constraints: Option<&ExerciseConstraints>) -> Vec<String> {
    let Some(c) = constraints else {
        return Vec::new();
    };

    let mut hints = Vec::new();
    if !c.required_chords.is_empty() {
        hints.push(format!("Must use: {}", c.required_chords.join(", ")));
    }
    if !c.forbidden_chords.is_empty() {
        hints.push(format!("Must not use: {}", c.forbidden_chords.join(", ")));
    }
    if let Some(min) = bound(c.min_length) {
        hints.push(format!("At least {min} chords"));
    }
    if let Some(max) = bound(c.max_length) {
        hints.push(format!("At most {max} chords"));
    }
    hints
}
