//! Integrity checks for exercise data.

use serde::{Deserialize, Serialize};

use super::{ChapterData, Exercise, ExerciseId};

/// Highest chapter number an exercise may belong to.
pub const MAX_CHAPTER: u32 = 60;

/// Exercises every chapter must hold.
pub const EXERCISES_PER_CHAPTER: usize = 2;

/// Findings from checking exercise data. Valid when there are no errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataCheck {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl DataCheck {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Append another check's findings, each prefixed with `context`.
    pub fn absorb(&mut self, other: DataCheck, context: &str) {
        self.errors
            .extend(other.errors.into_iter().map(|e| format!("{context}: {e}")));
        self.warnings
            .extend(other.warnings.into_iter().map(|w| format!("{context}: {w}")));
    }
}

fn chapter_in_range(chapter: u32) -> bool {
    (1..=MAX_CHAPTER).contains(&chapter)
}

/// Check one exercise for missing fields and inconsistent values.
#[must_use]
pub fn validate_exercise(exercise: &Exercise) -> DataCheck {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if exercise.id.is_empty() {
        errors.push("missing id".to_string());
    } else {
        match exercise.id.parse::<ExerciseId>() {
            Err(_) => errors.push(format!("malformed id {:?}", exercise.id)),
            Ok(id) if id != ExerciseId::new(exercise.chapter, exercise.number) => {
                errors.push(format!(
                    "id {} does not match chapter {} / number {}",
                    exercise.id, exercise.chapter, exercise.number
                ));
            }
            Ok(_) => {}
        }
    }

    if !chapter_in_range(exercise.chapter) {
        errors.push(format!(
            "chapter must be between 1 and {MAX_CHAPTER}, got {}",
            exercise.chapter
        ));
    }
    if !matches!(exercise.number, 1 | 2) {
        errors.push(format!("number must be 1 or 2, got {}", exercise.number));
    }
    if exercise.instructions.trim().is_empty() {
        errors.push("missing instructions".to_string());
    }
    if exercise.key.trim().is_empty() {
        errors.push("missing key".to_string());
    }
    if exercise.starting_chords.is_empty() {
        errors.push("missing starting chords".to_string());
    }
    if exercise.expected_length < 2 {
        errors.push(format!(
            "expected length must be at least 2, got {}",
            exercise.expected_length
        ));
    }
    if exercise.solution.is_empty() {
        errors.push("missing solution".to_string());
    }
    if exercise.starting_chords.len() > exercise.expected_length {
        errors.push(format!(
            "{} starting chord(s) exceed the expected length of {}",
            exercise.starting_chords.len(),
            exercise.expected_length
        ));
    }
    if !exercise.solution.is_empty() && exercise.solution.len() != exercise.expected_length {
        warnings.push(format!(
            "solution has {} chord(s) but the expected length is {}",
            exercise.solution.len(),
            exercise.expected_length
        ));
    }

    if let Some(constraints) = &exercise.constraints {
        let mut conflicting: Vec<&str> = Vec::new();
        for label in &constraints.required_chords {
            if constraints.forbidden_chords.contains(label)
                && !conflicting.contains(&label.as_str())
            {
                conflicting.push(label);
            }
        }
        for label in conflicting {
            errors.push(format!("chord {label} is both required and forbidden"));
        }

        if let (Some(min), Some(max)) = (constraints.min_length, constraints.max_length) {
            if min > 0 && max > 0 && min > max {
                errors.push(format!("minimum length {min} exceeds maximum length {max}"));
            }
        }
    }

    DataCheck { errors, warnings }
}

/// Check a chapter and every exercise in it.
#[must_use]
pub fn validate_chapter(chapter: &ChapterData) -> DataCheck {
    let mut check = DataCheck::default();

    if !chapter_in_range(chapter.chapter) {
        check
            .errors
            .push(format!("chapter must be between 1 and {MAX_CHAPTER}, got {}", chapter.chapter));
    }
    if chapter.title.trim().is_empty() {
        check.errors.push("missing title".to_string());
    }
    if chapter.exercises.len() != EXERCISES_PER_CHAPTER {
        check.errors.push(format!(
            "a chapter must hold exactly {EXERCISES_PER_CHAPTER} exercises, found {}",
            chapter.exercises.len()
        ));
    }

    for exercise in &chapter.exercises {
        check.absorb(validate_exercise(exercise), &format!("exercise {}", exercise.id));
    }
    check
}
