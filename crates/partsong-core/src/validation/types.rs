use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Voice;

/// A single part-writing violation, with everything needed to display it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Id of the rule that produced this error, e.g. `"parallel-fifths"`.
    pub rule_id: String,

    /// Display name of the rule.
    pub rule_name: String,

    /// What went wrong, in words.
    pub message: String,

    /// Textbook chapter the rule comes from, e.g. `"Chapter 1: Chord connection basics"`.
    pub chapter_reference: String,

    /// Voices involved. Never empty.
    pub affected_voices: Vec<Voice>,

    /// Progression indices of the chords involved. Never empty.
    pub affected_chords: Vec<usize>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chords: Vec<String> =
            self.affected_chords.iter().map(|i| (i + 1).to_string()).collect();
        write!(
            f,
            "[{}] {} (chord {}; {})",
            self.rule_name,
            self.message,
            chords.join("-"),
            self.chapter_reference
        )
    }
}

/// Outcome of running one rule, or a whole rule set, over a progression.
///
/// Valid exactly when there are no errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Concatenate the errors of several results, in order.
    #[must_use]
    pub fn merge(results: impl IntoIterator<Item = ValidationResult>) -> Self {
        Self {
            errors: results.into_iter().flat_map(|r| r.errors).collect(),
        }
    }
}
