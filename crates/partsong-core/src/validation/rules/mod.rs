//! The built-in chapter 1 rules.

mod parallel_fifths;
mod parallel_octaves;
mod voice_crossing;
mod voice_range;

pub use parallel_fifths::ParallelFifthsRule;
pub use parallel_octaves::ParallelOctavesRule;
pub use voice_crossing::VoiceCrossingRule;
pub use voice_range::VoiceRangeRule;

use super::rule::Rule;
use super::types::ValidationResult;
use crate::model::{Chord, ChordProgression, Note, Voice};

/// Chapter reference shared by the built-in rules.
pub(crate) const CHAPTER_ONE: &str = "Chapter 1: Chord connection basics";

/// The four basic rules, structural rules first.
#[must_use]
pub fn basic_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(VoiceRangeRule),
        Box::new(VoiceCrossingRule),
        Box::new(ParallelFifthsRule),
        Box::new(ParallelOctavesRule),
    ]
}

/// The chord before `index` and the chord at `index`, if both exist.
fn transition(progression: &ChordProgression, index: usize) -> Option<(&Chord, &Chord)> {
    let previous = progression.chord(index.checked_sub(1)?)?;
    Some((previous, progression.chord(index)?))
}

/// Every unordered voice pair `(upper, lower)` with `upper` above `lower`.
fn voice_pairs() -> impl Iterator<Item = (Voice, Voice)> {
    let count = Voice::ALL.len();
    (0..count).flat_map(move |i| (i + 1..count).map(move |j| (Voice::ALL[i], Voice::ALL[j])))
}

/// Shared body of the parallel-interval rules: one error per voice pair
/// caught by `detect` between chord `index - 1` and chord `index`.
fn parallel_errors(
    rule: &dyn Rule,
    progression: &ChordProgression,
    index: usize,
    detect: fn(&Note, &Note, &Note, &Note) -> bool,
    interval: &str,
) -> ValidationResult {
    let Some((previous, current)) = transition(progression, index) else {
        return ValidationResult::success();
    };

    let errors = voice_pairs()
        .filter(|&(upper, lower)| {
            detect(
                previous.note(upper),
                current.note(upper),
                previous.note(lower),
                current.note(lower),
            )
        })
        .map(|(upper, lower)| {
            rule.violation(
                format!(
                    "parallel {} between {} and {} ({} -> {} against {} -> {})",
                    interval,
                    upper,
                    lower,
                    previous.note(upper),
                    current.note(upper),
                    previous.note(lower),
                    current.note(lower)
                ),
                vec![upper, lower],
                vec![index - 1, index],
            )
        })
        .collect();
    ValidationResult::from_errors(errors)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_pairs() {
        let pairs: Vec<(Voice, Voice)> = voice_pairs().collect();
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0], (Voice::Soprano, Voice::Alto));
        assert_eq!(pairs[5], (Voice::Tenor, Voice::Bass));
        assert!(pairs.iter().all(|(upper, lower)| upper < lower));
    }

    #[test]
    fn test_transition_bounds() {
        let progression =
            fixtures::progression(&[["G4", "E4", "C4", "C3"], ["A4", "F4", "C4", "F3"]]);
        assert!(transition(&progression, 0).is_none());
        assert!(transition(&progression, 1).is_some());
        assert!(transition(&progression, 2).is_none());
    }

    #[test]
    fn test_basic_rules_order_and_ids() {
        let rules = basic_rules();
        let ids: Vec<&str> = rules.iter().map(|r| r.id()).collect();
        assert_eq!(
            ids,
            vec!["voice-range", "voice-crossing", "parallel-fifths", "parallel-octaves"]
        );
        assert!(rules.iter().all(|r| r.chapter() == 1));
    }
}
