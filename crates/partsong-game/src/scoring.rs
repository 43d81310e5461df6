use serde::{Deserialize, Serialize};

/// How a submission turns into points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Points for a submission with no issues.
    pub perfect_score: u32,

    /// Points lost per rule error or constraint violation.
    pub error_penalty: u32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            perfect_score: 100,
            error_penalty: 10,
        }
    }
}

impl ScoringPolicy {
    #[must_use]
    pub const fn new(perfect_score: u32, error_penalty: u32) -> Self {
        Self {
            perfect_score,
            error_penalty,
        }
    }

    /// Score for a submission with `issues` problems. Never below zero.
    #[must_use]
    pub fn score(&self, issues: usize) -> u32 {
        let issues = u32::try_from(issues).unwrap_or(u32::MAX);
        self.perfect_score
            .saturating_sub(self.error_penalty.saturating_mul(issues))
    }
}
