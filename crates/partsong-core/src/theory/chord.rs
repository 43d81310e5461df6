//! Structural checks on a single four-note chord.
//!
//! Findings come in two severities. [`StructureError`]s make the chord
//! invalid; [`StructureWarning`]s are informational and never affect
//! [`ChordReport::is_valid`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::pitch::{semitone, OCTAVE};
use crate::error::{Error, Result};
use crate::model::{Note, Voice};

/// Widest allowed gap between adjacent upper voices (S–A, A–T).
pub const MAX_UPPER_SPACING: u32 = 12;
/// Widest allowed gap between tenor and bass.
pub const MAX_BASS_SPACING: u32 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructureError {
    /// Fewer than two distinct pitch classes.
    TooUniform,
    /// More distinct pitch classes than there are voices.
    TooManyPitchClasses { count: usize },
    /// A partial-chord edit targeted a voice outside `0..=3`.
    VoiceIndexOutOfRange { index: usize },
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooUniform => {
                f.write_str("chord is too uniform: at least 2 distinct pitches are needed")
            }
            Self::TooManyPitchClasses { count } => {
                write!(
                    f,
                    "chord has {count} distinct pitch classes, more than the 4 voices can hold"
                )
            }
            Self::VoiceIndexOutOfRange { index } => {
                write!(f, "voice index must be between 0 and 3, got {index}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructureWarning {
    /// Three pitch classes that do not stack in thirds.
    NonTertianTriad,
    /// Adjacent voices spaced wider than allowed.
    WideSpacing { upper: Voice, lower: Voice, semitones: u32 },
    /// One pitch class sounding in three or more voices.
    ExcessDoubling { pitch_class: u8, count: usize },
    /// Only two distinct pitch classes.
    IncompleteChord,
}

impl fmt::Display for StructureWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonTertianTriad => {
                f.write_str("non-standard triad structure: pitches do not stack in thirds")
            }
            Self::WideSpacing { upper, lower, semitones } => {
                write!(f, "{upper} and {lower} are {semitones} semitones apart")
            }
            Self::ExcessDoubling { pitch_class, count } => {
                write!(f, "pitch class {pitch_class} appears {count} times")
            }
            Self::IncompleteChord => f.write_str("incomplete chord: only 2 distinct pitches"),
        }
    }
}

/// Outcome of a structural check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordReport {
    pub errors: Vec<StructureError>,
    pub warnings: Vec<StructureWarning>,
}

impl ChordReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Pitch class → number of voices sounding it, in ascending class order.
fn class_counts(notes: &[Note]) -> BTreeMap<u8, usize> {
    let mut counts = BTreeMap::new();
    for note in notes {
        *counts.entry(note.pitch.class()).or_insert(0) += 1;
    }
    counts
}

fn spacing_warning(
    upper: Voice,
    upper_note: &Note,
    lower: Voice,
    lower_note: &Note,
) -> Option<StructureWarning> {
    let gap = semitone(upper_note).saturating_sub(semitone(lower_note)).unsigned_abs();
    let limit = if lower == Voice::Bass {
        MAX_BASS_SPACING
    } else {
        MAX_UPPER_SPACING
    };
    (gap > limit).then_some(StructureWarning::WideSpacing {
        upper,
        lower,
        semitones: gap,
    })
}

fn four(notes: &[Note]) -> Result<&[Note; 4]> {
    notes.try_into().map_err(|_| Error::ChordSize(notes.len()))
}

fn warnings_only(warnings: Vec<StructureWarning>) -> ChordReport {
    ChordReport {
        errors: Vec::new(),
        warnings,
    }
}

fn triad_report(notes: &[Note; 4]) -> ChordReport {
    let mut report = ChordReport::default();
    let classes: Vec<u8> = class_counts(notes).into_keys().collect();

    if classes.len() < 2 {
        report.errors.push(StructureError::TooUniform);
        return report;
    }
    if classes.len() > 4 {
        report.errors.push(StructureError::TooManyPitchClasses { count: classes.len() });
        return report;
    }
    if let [low, mid, high] = classes[..] {
        let is_third = |gap: i32| matches!(gap.rem_euclid(OCTAVE), 3 | 4);
        let lower_gap = i32::from(mid) - i32::from(low);
        let upper_gap = i32::from(high) - i32::from(mid);
        if !is_third(lower_gap) || !is_third(upper_gap) {
            report.warnings.push(StructureWarning::NonTertianTriad);
        }
    }
    report
}

fn spacing_report(notes: &[Note; 4]) -> ChordReport {
    warnings_only(
        Voice::ALL
            .windows(2)
            .filter_map(|pair| {
                let (upper, lower) = (pair[0], pair[1]);
                spacing_warning(upper, &notes[upper.index()], lower, &notes[lower.index()])
            })
            .collect(),
    )
}

fn doubling_report(notes: &[Note; 4]) -> ChordReport {
    let counts = class_counts(notes);
    let mut warnings: Vec<StructureWarning> = counts
        .iter()
        .filter(|&(_, &count)| count >= 3)
        .map(|(&pitch_class, &count)| StructureWarning::ExcessDoubling { pitch_class, count })
        .collect();
    if counts.len() == 2 {
        warnings.push(StructureWarning::IncompleteChord);
    }
    warnings_only(warnings)
}

fn full_report(notes: &[Note; 4]) -> ChordReport {
    let mut report = ChordReport::default();
    for part in [triad_report(notes), spacing_report(notes), doubling_report(notes)] {
        report.errors.extend(part.errors);
        report.warnings.extend(part.warnings);
    }
    report
}

/// Triad-shape check: pitch-class count and stacking in thirds.
pub fn check_triad(notes: &[Note]) -> Result<ChordReport> {
    Ok(triad_report(four(notes)?))
}

/// Spacing between adjacent voices.
pub fn check_spacing(notes: &[Note]) -> Result<ChordReport> {
    Ok(spacing_report(four(notes)?))
}

/// Doubling: tripled pitch classes and two-class chords.
pub fn check_doubling(notes: &[Note]) -> Result<ChordReport> {
    Ok(doubling_report(four(notes)?))
}

/// Full structural validation: triad shape, then spacing, then doubling.
pub fn validate_chord(notes: &[Note]) -> Result<ChordReport> {
    Ok(full_report(four(notes)?))
}

/// Incremental feedback while a chord is being filled in.
///
/// `existing` holds the voices entered so far; `new_note` is placed at
/// `voice_index` on a copy. With fewer than two voices filled the result is
/// always valid. With two or three, adjacent filled upper pairs (S–A, A–T)
/// are checked for spacing; the tenor–bass gap waits for the full chord.
/// With all four, the result of [`validate_chord`] is returned unchanged.
#[must_use]
pub fn can_add_note_to_chord(
    existing: &[Option<Note>; 4],
    new_note: &Note,
    voice_index: usize,
) -> ChordReport {
    let Ok(voice) = Voice::from_index(voice_index) else {
        return ChordReport {
            errors: vec![StructureError::VoiceIndexOutOfRange { index: voice_index }],
            warnings: Vec::new(),
        };
    };

    let mut slots = existing.clone();
    slots[voice.index()] = Some(new_note.clone());

    match slots {
        [Some(soprano), Some(alto), Some(tenor), Some(bass)] => {
            full_report(&[soprano, alto, tenor, bass])
        }
        slots if slots.iter().flatten().count() < 2 => ChordReport::default(),
        slots => warnings_only(
            [Voice::Soprano, Voice::Alto, Voice::Tenor]
                .windows(2)
                .filter_map(|pair| {
                    let (upper, lower) = (pair[0], pair[1]);
                    match (&slots[upper.index()], &slots[lower.index()]) {
                        (Some(u), Some(l)) => spacing_warning(upper, u, lower, l),
                        _ => None,
                    }
                })
                .collect(),
        ),
    }
}

/// The lowest-sounding note (first one wins on ties).
pub fn chord_root(notes: &[Note]) -> Result<&Note> {
    notes
        .iter()
        .reduce(|lowest, note| if semitone(note) < semitone(lowest) { note } else { lowest })
        .ok_or(Error::EmptyNotes)
}
