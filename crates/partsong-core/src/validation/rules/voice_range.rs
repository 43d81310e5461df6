use super::CHAPTER_ONE;
use crate::model::{ChordProgression, Voice};
use crate::theory::range::{chord_range_violations, RangeDirection};
use crate::theory::semitone_name;
use crate::validation::rule::{Rule, RulePriority};
use crate::validation::types::ValidationResult;

/// Flags every note outside its voice's range.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoiceRangeRule;

impl VoiceRangeRule {
    pub const ID: &'static str = "voice-range";
}

impl Rule for VoiceRangeRule {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        "Voice range"
    }

    fn chapter(&self) -> u32 {
        1
    }

    fn priority(&self) -> u32 {
        RulePriority::Structure.value()
    }

    fn description(&self) -> &str {
        "Each voice must stay within its natural singing range."
    }

    fn chapter_reference(&self) -> String {
        CHAPTER_ONE.to_string()
    }

    fn validate(&self, progression: &ChordProgression, chord_index: usize) -> ValidationResult {
        let Some(chord) = progression.chord(chord_index) else {
            return ValidationResult::success();
        };

        let errors = chord_range_violations(chord)
            .into_iter()
            .map(|(voice, violation)| {
                let range = voice.range();
                let direction = match violation.direction {
                    RangeDirection::TooLow => "low",
                    RangeDirection::TooHigh => "high",
                };
                self.violation(
                    format!(
                        "{} note {} is {} semitone(s) too {} (range {} - {})",
                        voice,
                        chord.note(voice),
                        violation.semitones,
                        direction,
                        semitone_name(range.min),
                        semitone_name(range.max)
                    ),
                    vec![voice],
                    vec![chord_index],
                )
            })
            .collect();
        ValidationResult::from_errors(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::fixtures::progression;

    #[test]
    fn test_in_range_chord_passes() {
        let p = progression(&[["G4", "E4", "C4", "C3"]]);
        assert!(VoiceRangeRule.validate(&p, 0).is_valid());
    }

    #[test]
    fn test_one_error_per_voice() {
        let p = progression(&[["G4", "E4", "C4", "C3"], ["C6", "E4", "C4", "C1"]]);
        let result = VoiceRangeRule.validate(&p, 1);
        assert_eq!(result.errors.len(), 2);

        let soprano = &result.errors[0];
        assert_eq!(soprano.rule_id, "voice-range");
        assert_eq!(soprano.affected_voices, vec![Voice::Soprano]);
        assert_eq!(soprano.affected_chords, vec![1]);
        assert_eq!(soprano.message, "Soprano note C6 is 3 semitone(s) too high (range C4 - A5)");
        assert_eq!(soprano.chapter_reference, CHAPTER_ONE);

        assert_eq!(result.errors[1].affected_voices, vec![Voice::Bass]);
    }

    #[test]
    fn test_first_chord_is_checked() {
        let p = progression(&[["G3", "E4", "C4", "C3"]]);
        let result = VoiceRangeRule.validate(&p, 0);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].affected_chords, vec![0]);
    }

    #[test]
    fn test_index_past_end_is_ignored() {
        let p = progression(&[["C6", "E4", "C4", "C3"]]);
        assert!(VoiceRangeRule.validate(&p, 5).is_valid());
    }
}
