use super::CHAPTER_ONE;
use crate::model::ChordProgression;
use crate::theory::range::find_voice_crossings;
use crate::validation::rule::{Rule, RulePriority};
use crate::validation::types::ValidationResult;

/// Flags adjacent voices where the lower part sounds at or above the upper one.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoiceCrossingRule;

impl VoiceCrossingRule {
    pub const ID: &'static str = "voice-crossing";
}

impl Rule for VoiceCrossingRule {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        "Voice crossing"
    }

    fn chapter(&self) -> u32 {
        1
    }

    fn priority(&self) -> u32 {
        RulePriority::Structure.value()
    }

    fn description(&self) -> &str {
        "A lower voice must stay below the voice above it."
    }

    fn chapter_reference(&self) -> String {
        CHAPTER_ONE.to_string()
    }

    fn validate(&self, progression: &ChordProgression, chord_index: usize) -> ValidationResult {
        let Some(chord) = progression.chord(chord_index) else {
            return ValidationResult::success();
        };

        let errors = find_voice_crossings(chord)
            .into_iter()
            .map(|crossing| {
                self.violation(
                    format!(
                        "{} ({}) is at or above {} ({})",
                        crossing.lower,
                        chord.note(crossing.lower),
                        crossing.higher,
                        chord.note(crossing.higher)
                    ),
                    vec![crossing.higher, crossing.lower],
                    vec![chord_index],
                )
            })
            .collect();
        ValidationResult::from_errors(errors)
    }
}
