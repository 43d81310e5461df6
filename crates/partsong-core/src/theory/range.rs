//! Voice ranges and voice crossing.
//!
//! Each voice has a fixed window of absolute semitones, based on standard
//! four-part choral writing. Adjacent windows overlap.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::pitch::{semitone, semitone_name};
use crate::error::{Error, Result};
use crate::model::{Chord, Note, Voice};

/// Admissible semitone window for one voice, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceRange {
    pub voice: Voice,
    pub min: i32,
    pub max: i32,
}

impl VoiceRange {
    #[must_use]
    pub const fn contains(&self, semitones: i32) -> bool {
        semitones >= self.min && semitones <= self.max
    }

    /// Middle of the window, rounded down.
    #[must_use]
    pub const fn center(&self) -> i32 {
        (self.min + self.max).div_euclid(2)
    }
}

impl fmt::Display for VoiceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} - {}",
            self.voice,
            semitone_name(self.min),
            semitone_name(self.max)
        )
    }
}

impl Voice {
    /// Fixed range table: Soprano C4–A5, Alto G3–E5, Tenor C3–G4, Bass E2–D4.
    #[must_use]
    pub const fn range(self) -> VoiceRange {
        let (min, max) = match self {
            Self::Soprano => (48, 69),
            Self::Alto => (43, 64),
            Self::Tenor => (36, 55),
            Self::Bass => (28, 50),
        };
        VoiceRange { voice: self, min, max }
    }
}

/// Which side of the window a note falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeDirection {
    TooLow,
    TooHigh,
}

/// How far a note lies outside its voice's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeViolation {
    pub direction: RangeDirection,
    /// Distance in semitones from the nearest edge of the window.
    pub semitones: u32,
}

#[must_use]
pub fn is_in_range(note: &Note, voice: Voice) -> bool {
    voice.range().contains(semitone(note))
}

#[must_use]
pub fn range_violation(note: &Note, voice: Voice) -> Option<RangeViolation> {
    let value = semitone(note);
    let range = voice.range();
    if value < range.min {
        Some(RangeViolation {
            direction: RangeDirection::TooLow,
            semitones: (range.min - value).unsigned_abs(),
        })
    } else if value > range.max {
        Some(RangeViolation {
            direction: RangeDirection::TooHigh,
            semitones: (value - range.max).unsigned_abs(),
        })
    } else {
        None
    }
}

/// Every voice of `chord` that lies outside its window.
#[must_use]
pub fn chord_range_violations(chord: &Chord) -> Vec<(Voice, RangeViolation)> {
    Voice::ALL
        .into_iter()
        .filter_map(|voice| range_violation(chord.note(voice), voice).map(|v| (voice, v)))
        .collect()
}

fn crosses(lower_note: &Note, higher_note: &Note) -> bool {
    semitone(lower_note) >= semitone(higher_note)
}

/// Whether `lower_voice` sounds at or above `higher_voice`.
///
/// `lower_voice` must be the lower-register voice (larger ordinal). Passing
/// the voices the other way round is rejected with [`Error::VoiceOrder`].
pub fn has_voice_crossing(
    lower_voice: Voice,
    lower_note: &Note,
    higher_voice: Voice,
    higher_note: &Note,
) -> Result<bool> {
    if lower_voice <= higher_voice {
        return Err(Error::VoiceOrder {
            lower: lower_voice,
            higher: higher_voice,
        });
    }
    Ok(crosses(lower_note, higher_note))
}

/// A pair of adjacent voices found crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceCrossing {
    pub lower: Voice,
    pub higher: Voice,
}

/// Adjacent voice pairs, as (lower, higher).
pub const ADJACENT_PAIRS: [(Voice, Voice); 3] = [
    (Voice::Alto, Voice::Soprano),
    (Voice::Tenor, Voice::Alto),
    (Voice::Bass, Voice::Tenor),
];

/// Check Soprano/Alto, Alto/Tenor and Tenor/Bass for crossings.
#[must_use]
pub fn find_voice_crossings(chord: &Chord) -> Vec<VoiceCrossing> {
    ADJACENT_PAIRS
        .into_iter()
        .filter(|&(lower, higher)| crosses(chord.note(lower), chord.note(higher)))
        .map(|(lower, higher)| VoiceCrossing { lower, higher })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(s: &str) -> Note {
        s.parse().unwrap()
    }

    fn chord(notes: [&str; 4]) -> Chord {
        Chord::new(notes.map(n))
    }

    #[test]
    fn test_ranges_descend_and_overlap() {
        for pair in Voice::ALL.windows(2) {
            let (upper, lower) = (pair[0].range(), pair[1].range());
            assert!(upper.min > lower.min);
            assert!(upper.max > lower.max);
            assert!(lower.max >= upper.min, "{upper} / {lower} should overlap");
        }
    }

    #[test]
    fn test_range_display_and_center() {
        assert_eq!(Voice::Soprano.range().to_string(), "Soprano: C4 - A5");
        assert_eq!(Voice::Bass.range().to_string(), "Bass: E2 - D4");
        assert_eq!(Voice::Tenor.range().center(), 45);
    }

    #[test]
    fn test_is_in_range_edges() {
        assert!(is_in_range(&n("C4"), Voice::Soprano));
        assert!(is_in_range(&n("A5"), Voice::Soprano));
        assert!(!is_in_range(&n("B3"), Voice::Soprano));
        assert!(!is_in_range(&n("A#5"), Voice::Soprano));
        assert!(is_in_range(&n("E2"), Voice::Bass));
    }

    #[test]
    fn test_range_violation_distance() {
        assert_eq!(
            range_violation(&n("A3"), Voice::Soprano),
            Some(RangeViolation {
                direction: RangeDirection::TooLow,
                semitones: 3
            })
        );
        assert_eq!(
            range_violation(&n("C6"), Voice::Soprano),
            Some(RangeViolation {
                direction: RangeDirection::TooHigh,
                semitones: 3
            })
        );
        assert_eq!(range_violation(&n("E4"), Voice::Alto), None);
    }

    #[test]
    fn test_chord_range_violations() {
        let violations = chord_range_violations(&chord(["C6", "E4", "G3", "C1"]));
        let voices: Vec<Voice> = violations.iter().map(|(v, _)| *v).collect();
        assert_eq!(voices, vec![Voice::Soprano, Voice::Bass]);
    }

    #[test]
    fn test_voice_crossing() {
        assert!(has_voice_crossing(Voice::Alto, &n("A4"), Voice::Soprano, &n("G4")).unwrap());
        assert!(has_voice_crossing(Voice::Alto, &n("G4"), Voice::Soprano, &n("G4")).unwrap());
        assert!(!has_voice_crossing(Voice::Alto, &n("E4"), Voice::Soprano, &n("G4")).unwrap());
        // Non-adjacent voices are allowed as long as the order is right.
        assert!(has_voice_crossing(Voice::Bass, &n("C5"), Voice::Soprano, &n("G4")).unwrap());
    }

    #[test]
    fn test_voice_crossing_wrong_order_is_an_error() {
        let err = has_voice_crossing(Voice::Soprano, &n("G4"), Voice::Alto, &n("E4")).unwrap_err();
        assert!(matches!(
            err,
            Error::VoiceOrder {
                lower: Voice::Soprano,
                higher: Voice::Alto
            }
        ));
        assert!(has_voice_crossing(Voice::Tenor, &n("C4"), Voice::Tenor, &n("C4")).is_err());
    }

    #[test]
    fn test_find_voice_crossings() {
        assert!(find_voice_crossings(&chord(["G4", "E4", "C4", "C3"])).is_empty());

        let crossings = find_voice_crossings(&chord(["E4", "G4", "C4", "C4"]));
        assert_eq!(
            crossings,
            vec![
                VoiceCrossing {
                    lower: Voice::Alto,
                    higher: Voice::Soprano
                },
                VoiceCrossing {
                    lower: Voice::Bass,
                    higher: Voice::Tenor
                },
            ]
        );
    }
}
