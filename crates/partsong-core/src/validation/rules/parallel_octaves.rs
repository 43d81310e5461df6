use super::{parallel_errors, CHAPTER_ONE};
use crate::model::ChordProgression;
use crate::theory::has_parallel_octaves;
use crate::validation::rule::{Rule, RulePriority};
use crate::validation::types::ValidationResult;

/// Flags any two voices moving in parallel octaves or unisons.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelOctavesRule;

impl ParallelOctavesRule {
    pub const ID: &'static str = "parallel-octaves";
}

impl Rule for ParallelOctavesRule {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        "Parallel octaves"
    }

    fn chapter(&self) -> u32 {
        1
    }

    fn priority(&self) -> u32 {
        RulePriority::VoiceLeading.value()
    }

    fn description(&self) -> &str {
        "Two voices may not move in parallel octaves or unisons."
    }

    fn chapter_reference(&self) -> String {
        CHAPTER_ONE.to_string()
    }

    fn validate(&self, progression: &ChordProgression, chord_index: usize) -> ValidationResult {
        parallel_errors(self, progression, chord_index, has_parallel_octaves, "octaves")
    }
}
