use super::{parallel_errors, CHAPTER_ONE};
use crate::model::ChordProgression;
use crate::theory::has_parallel_fifths;
use crate::validation::rule::{Rule, RulePriority};
use crate::validation::types::ValidationResult;

/// Flags any two voices moving in parallel perfect fifths.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelFifthsRule;

impl ParallelFifthsRule {
    pub const ID: &'static str = "parallel-fifths";
}

impl Rule for ParallelFifthsRule {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        "Parallel fifths"
    }

    fn chapter(&self) -> u32 {
        1
    }

    fn priority(&self) -> u32 {
        RulePriority::VoiceLeading.value()
    }

    fn description(&self) -> &str {
        "Two voices may not move in parallel perfect fifths; it weakens their independence."
    }

    fn chapter_reference(&self) -> String {
        CHAPTER_ONE.to_string()
    }

    fn validate(&self, progression: &ChordProgression, chord_index: usize) -> ValidationResult {
        parallel_errors(self, progression, chord_index, has_parallel_fifths, "fifths")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Voice;
    use crate::validation::rules::fixtures::progression;

    #[test]
    fn test_first_chord_always_passes() {
        let p = progression(&[["G4", "C4", "C4", "C3"]]);
        assert!(ParallelFifthsRule.validate(&p, 0).is_valid());
    }

    #[test]
    fn test_parallel_fifths_between_lower_voices() {
        // Tenor G3 -> A3 over bass C3 -> D3.
        let p = progression(&[["E4", "C4", "G3", "C3"], ["F4", "D4", "A3", "D3"]]);
        let result = ParallelFifthsRule.validate(&p, 1);
        assert_eq!(result.errors.len(), 1);

        let error = &result.errors[0];
        assert_eq!(error.rule_id, "parallel-fifths");
        assert_eq!(error.affected_voices, vec![Voice::Tenor, Voice::Bass]);
        assert_eq!(error.affected_chords, vec![0, 1]);
        assert_eq!(
            error.message,
            "parallel fifths between Tenor and Bass (G3 -> A3 against C3 -> D3)"
        );
    }

    #[test]
    fn test_compound_fifths_counted() {
        // Soprano against tenor (fifth) and against bass (twelfth).
        let p = progression(&[["G4", "E4", "C4", "C3"], ["A4", "F4", "D4", "D3"]]);
        let result = ParallelFifthsRule.validate(&p, 1);
        let pairs: Vec<Vec<Voice>> =
            result.errors.iter().map(|e| e.affected_voices.clone()).collect();
        assert_eq!(
            pairs,
            vec![vec![Voice::Soprano, Voice::Tenor], vec![Voice::Soprano, Voice::Bass]]
        );
    }

    #[test]
    fn test_contrary_fifths_pass() {
        // Tenor rises G3 -> A3 while the bass falls C3 -> D2: fifth to twelfth.
        let p = progression(&[["E4", "C4", "G3", "C3"], ["F4", "D4", "A3", "D2"]]);
        assert!(ParallelFifthsRule.validate(&p, 1).is_valid());
    }

    #[test]
    fn test_repeated_chord_passes() {
        let p = progression(&[["G4", "E4", "C4", "C3"], ["G4", "E4", "C4", "C3"]]);
        assert!(ParallelFifthsRule.validate(&p, 1).is_valid());
    }

    #[test]
    fn test_clean_progression_passes() {
        let p = progression(&[["G4", "E4", "C4", "C3"], ["A4", "F4", "C4", "F3"]]);
        assert!(ParallelFifthsRule.validate(&p, 1).is_valid());
    }
}
