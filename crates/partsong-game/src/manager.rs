//! Starting, submitting and resetting levels.

use partsong_core::constraints::can_submit_progression;
use partsong_core::{
    validate_constraints, ChordProgression, ConstraintReport, Exercise, ExerciseId, ExerciseSet,
    RuleEngine, ValidationResult,
};
use serde::Serialize;
use std::path::Path;

use crate::error::{GameError, Result};
use crate::scoring::ScoringPolicy;
use crate::state::{GameState, LevelStatus};

/// Outcome of submitting a progression for a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub level: ExerciseId,
    /// Part-writing errors at the exercise's chapter.
    pub validation: ValidationResult,
    pub constraints: ConstraintReport,
    /// Number of chords submitted.
    pub length: usize,
    /// Number of chords the exercise asks for.
    pub expected_length: usize,
    pub score: u32,
    /// Whether the submission has the expected length and passed both checks.
    pub completed: bool,
    /// Levels this submission unlocked.
    pub unlocked: Vec<ExerciseId>,
}

impl Submission {
    #[must_use]
    pub fn length_matches(&self) -> bool {
        self.length == self.expected_length
    }

    /// Rule errors plus constraint violations, plus one for a wrong length.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.validation.errors.len()
            + self.constraints.violations.len()
            + usize::from(!self.length_matches())
    }
}

/// Runs levels against an exercise set with a fixed rule engine.
#[derive(Debug)]
pub struct GameManager {
    engine: RuleEngine,
    exercises: ExerciseSet,
    scoring: ScoringPolicy,
}

impl GameManager {
    #[must_use]
    pub fn new(engine: RuleEngine, exercises: ExerciseSet) -> Self {
        Self {
            engine,
            exercises,
            scoring: ScoringPolicy::default(),
        }
    }

    /// Load and check an exercise file, then play it with `engine`.
    pub fn from_file(engine: RuleEngine, path: &Path) -> Result<Self> {
        Ok(Self::new(engine, ExerciseSet::load(path)?))
    }

    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }

    #[must_use]
    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    #[must_use]
    pub fn exercises(&self) -> &ExerciseSet {
        &self.exercises
    }

    #[must_use]
    pub fn scoring(&self) -> ScoringPolicy {
        self.scoring
    }

    /// A fresh game with one level per exercise in the set.
    #[must_use]
    pub fn new_game(&self) -> GameState {
        GameState::with_levels(self.exercises.exercises().filter_map(Exercise::exercise_id))
    }

    fn exercise(&self, id: ExerciseId) -> Result<&Exercise> {
        self.exercises.exercise(id).ok_or(GameError::ExerciseNotFound(id))
    }

    /// Begin (or retry) a level.
    ///
    /// The level must exist and be unlocked. Each start counts as an attempt;
    /// a level being started for the first time moves to in-progress.
    pub fn start_level(&self, state: &mut GameState, id: ExerciseId) -> Result<&Exercise> {
        let status = state.level(id).ok_or(GameError::LevelNotFound(id))?.status;
        if status == LevelStatus::Locked {
            return Err(GameError::LevelLocked(id));
        }
        let exercise = self.exercise(id)?;

        state.current_level = Some(id);
        if let Some(level) = state.level_mut(id) {
            level.attempts = level.attempts.saturating_add(1);
            if level.status == LevelStatus::Unlocked {
                level.status = LevelStatus::InProgress;
            }
            log::debug!("Started level {id} (attempt {})", level.attempts);
        }
        Ok(exercise)
    }

    /// Grade a progression against an exercise without touching any game state.
    pub fn evaluate(&self, id: ExerciseId, progression: &ChordProgression) -> Result<Submission> {
        let exercise = self.exercise(id)?;
        let validation = self.engine.validate(progression, exercise.chapter);
        let constraints = validate_constraints(progression, exercise.constraints.as_ref());
        let completed = validation.is_valid()
            && can_submit_progression(
                progression,
                exercise.constraints.as_ref(),
                exercise.expected_length,
            );

        let mut submission = Submission {
            level: id,
            validation,
            constraints,
            length: progression.len(),
            expected_length: exercise.expected_length,
            score: 0,
            completed,
            unlocked: Vec::new(),
        };
        submission.score = self.scoring.score(submission.issue_count());
        Ok(submission)
    }

    /// Check a progression for a level and record the result.
    ///
    /// The level completes when the progression has the exercise's expected
    /// length, has no rule errors at the exercise's chapter, and meets every
    /// exercise constraint. Only the first completion of a level adds to the
    /// total score.
    pub fn submit(
        &self,
        state: &mut GameState,
        id: ExerciseId,
        progression: ChordProgression,
    ) -> Result<Submission> {
        let mut submission = self.evaluate(id, &progression)?;
        let previous = state.level(id).ok_or(GameError::LevelNotFound(id))?.status;
        if previous == LevelStatus::Locked {
            return Err(GameError::LevelLocked(id));
        }

        let (score, completed) = (submission.score, submission.completed);
        if let Some(level) = state.level_mut(id) {
            level.score = score;
            level.current_progression = Some(progression);
            if completed {
                level.status = LevelStatus::Completed;
                level.best_score = level.best_score.max(score);
            }
        }

        if completed {
            if previous != LevelStatus::Completed {
                state.total_score = state.total_score.saturating_add(score);
                state.completed_levels = state.completed_levels.saturating_add(1);
                log::info!("Completed level {id} with {score} point(s)");
            }
            let next = id.next();
            if state.unlock(next) {
                log::info!("Unlocked level {next}");
                submission.unlocked.push(next);
            }
        }

        Ok(submission)
    }

    /// Discard the level's saved progression.
    pub fn reset_level(&self, state: &mut GameState, id: ExerciseId) -> Result<()> {
        let level = state.level_mut(id).ok_or(GameError::LevelNotFound(id))?;
        level.current_progression = None;
        Ok(())
    }

    /// Store work in progress for a level without checking it.
    pub fn save_progress(
        &self,
        state: &mut GameState,
        id: ExerciseId,
        progression: ChordProgression,
    ) -> Result<()> {
        let level = state.level_mut(id).ok_or(GameError::LevelNotFound(id))?;
        level.current_progression = Some(progression);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partsong_core::exercise::ChapterData;
    use partsong_core::{Chord, ExerciseConstraints, Note};

    fn chord(spellings: [&str; 4], label: &str) -> Chord {
        Chord::new(spellings.map(|s| s.parse::<Note>().unwrap())).with_label(label)
    }

    fn tonic() -> Chord {
        chord(["G4", "E4", "C4", "C3"], "I")
    }

    fn dominant() -> Chord {
        chord(["G4", "D4", "B3", "G2"], "V")
    }

    fn progression(chords: Vec<Chord>) -> ChordProgression {
        ChordProgression::new(chords, "C major").unwrap()
    }

    fn exercise(chapter: u32, number: u32) -> Exercise {
        Exercise {
            id: format!("{chapter}-{number}"),
            chapter,
            number,
            instructions: "Connect I to V.".to_string(),
            key: "C major".to_string(),
            starting_chords: vec![tonic()],
            expected_length: 2,
            constraints: Some(ExerciseConstraints {
                required_chords: vec!["V".to_string()],
                ..ExerciseConstraints::default()
            }),
            solution: progression(vec![tonic(), dominant()]),
            difficulty: None,
            hints: Vec::new(),
        }
    }

    fn manager() -> GameManager {
        let chapters = (1..=2)
            .map(|chapter| ChapterData {
                chapter,
                title: format!("Chapter {chapter}"),
                description: None,
                exercises: vec![exercise(chapter, 1), exercise(chapter, 2)],
                concepts: Vec::new(),
            })
            .collect();
        let set = ExerciseSet {
            version: "1.0".to_string(),
            chapters,
        };
        GameManager::new(RuleEngine::with_basic_rules(), set)
    }

    #[test]
    fn test_start_level_counts_attempts() {
        let manager = manager();
        let mut state = manager.new_game();
        let first = ExerciseId::new(1, 1);

        let exercise = manager.start_level(&mut state, first).unwrap();
        assert_eq!(exercise.id, "1-1");
        assert_eq!(state.current_level, Some(first));
        assert_eq!(state.level(first).unwrap().status, LevelStatus::InProgress);

        manager.start_level(&mut state, first).unwrap();
        assert_eq!(state.level(first).unwrap().attempts, 2);
        assert_eq!(state.level(first).unwrap().status, LevelStatus::InProgress);
    }

    #[test]
    fn test_start_level_rejects_locked_and_unknown() {
        let manager = manager();
        let mut state = manager.new_game();

        assert!(matches!(
            manager.start_level(&mut state, ExerciseId::new(1, 2)),
            Err(GameError::LevelLocked(_))
        ));
        assert!(matches!(
            manager.start_level(&mut state, ExerciseId::new(9, 1)),
            Err(GameError::LevelNotFound(_))
        ));
        assert_eq!(state.level(ExerciseId::new(1, 2)).unwrap().attempts, 0);
    }

    #[test]
    fn test_perfect_submission_completes_and_unlocks() {
        let manager = manager();
        let mut state = manager.new_game();
        let first = ExerciseId::new(1, 1);
        manager.start_level(&mut state, first).unwrap();

        let submission = manager
            .submit(&mut state, first, progression(vec![tonic(), dominant()]))
            .unwrap();
        assert!(submission.completed);
        assert_eq!(submission.score, 100);
        assert_eq!(submission.unlocked, vec![ExerciseId::new(1, 2)]);

        let level = state.level(first).unwrap();
        assert_eq!(level.status, LevelStatus::Completed);
        assert_eq!(level.best_score, 100);
        assert_eq!(state.total_score, 100);
        assert_eq!(state.completed_levels, 1);
    }

    #[test]
    fn test_constraint_violation_blocks_completion() {
        let manager = manager();
        let mut state = manager.new_game();
        let first = ExerciseId::new(1, 1);

        // Clean voice leading, but the required V is missing.
        let submission = manager
            .submit(&mut state, first, progression(vec![tonic(), tonic()]))
            .unwrap();
        assert!(submission.validation.is_valid());
        assert!(!submission.completed);
        assert_eq!(submission.issue_count(), 1);
        assert_eq!(submission.score, 90);
        assert!(submission.unlocked.is_empty());

        let level = state.level(first).unwrap();
        assert_eq!(level.status, LevelStatus::Unlocked);
        assert_eq!(level.score, 90);
        assert_eq!(level.best_score, 0);
        assert_eq!(state.total_score, 0);
    }

    #[test]
    fn test_short_submission_does_not_complete() {
        let mut set = manager().exercises().clone();
        set.chapters[0].exercises[0].constraints = None;
        let manager = GameManager::new(RuleEngine::with_basic_rules(), set);
        let mut state = manager.new_game();
        let first = ExerciseId::new(1, 1);

        // A lone chord passes every rule and there are no constraints.
        let submission = manager.submit(&mut state, first, progression(vec![tonic()])).unwrap();
        assert!(submission.validation.is_valid());
        assert!(submission.constraints.is_valid());
        assert!(!submission.length_matches());
        assert!(!submission.completed);
        assert_eq!(submission.issue_count(), 1);
        assert_eq!(submission.score, 90);
        assert!(submission.unlocked.is_empty());

        assert_eq!(state.level(first).unwrap().status, LevelStatus::Unlocked);
        assert!(!state.is_unlocked(ExerciseId::new(1, 2)));
        assert_eq!(state.total_score, 0);
        assert_eq!(state.completed_levels, 0);
    }

    #[test]
    fn test_long_submission_does_not_complete() {
        let manager = manager();
        let mut state = manager.new_game();
        let first = ExerciseId::new(1, 1);

        let long = progression(vec![tonic(), dominant(), tonic()]);
        let submission = manager.submit(&mut state, first, long).unwrap();
        assert!(submission.validation.is_valid());
        assert!(submission.constraints.is_valid());
        assert_eq!((submission.length, submission.expected_length), (3, 2));
        assert!(!submission.completed);
        assert_eq!(submission.score, 90);
        assert!(submission.unlocked.is_empty());
        assert!(!state.is_unlocked(ExerciseId::new(1, 2)));
        assert_eq!(state.total_score, 0);
    }

    #[test]
    fn test_rule_errors_cost_points() {
        let manager = manager();
        let mut state = manager.new_game();
        let first = ExerciseId::new(1, 1);

        // Parallel fifths (S/T, S/B) and octaves (T/B) into a V-labelled chord.
        let bad = progression(vec![tonic(), chord(["A4", "F4", "D4", "D3"], "V")]);
        let submission = manager.submit(&mut state, first, bad).unwrap();
        assert_eq!(submission.validation.errors.len(), 3);
        assert_eq!(submission.score, 70);
        assert!(!submission.completed);
    }

    #[test]
    fn test_repeat_completion_scores_once() {
        let manager = manager();
        let mut state = manager.new_game();
        let first = ExerciseId::new(1, 1);
        let good = progression(vec![tonic(), dominant()]);

        manager.submit(&mut state, first, good.clone()).unwrap();
        let again = manager.submit(&mut state, first, good).unwrap();
        assert!(again.completed);
        assert!(again.unlocked.is_empty());
        assert_eq!(state.total_score, 100);
        assert_eq!(state.completed_levels, 1);
    }

    #[test]
    fn test_total_score_saturates() {
        let manager = manager();
        let mut state = manager.new_game();
        state.total_score = u32::MAX - 10;
        state.completed_levels = u32::MAX;

        let first = ExerciseId::new(1, 1);
        let submission = manager
            .submit(&mut state, first, progression(vec![tonic(), dominant()]))
            .unwrap();
        assert!(submission.completed);
        assert_eq!(state.total_score, u32::MAX);
        assert_eq!(state.completed_levels, u32::MAX);
    }

    #[test]
    fn test_unlock_sequence_crosses_chapters() {
        let manager = manager();
        let mut state = manager.new_game();
        let good = progression(vec![tonic(), dominant()]);

        let order = [
            ExerciseId::new(1, 1),
            ExerciseId::new(1, 2),
            ExerciseId::new(2, 1),
            ExerciseId::new(2, 2),
        ];
        let mut unlocked = Vec::new();
        for id in order {
            manager.start_level(&mut state, id).unwrap();
            unlocked.extend(manager.submit(&mut state, id, good.clone()).unwrap().unlocked);
        }

        assert_eq!(unlocked, order[1..].to_vec());
        assert_eq!(state.completed(), order.to_vec());
        assert_eq!(state.total_score, 400);
    }

    #[test]
    fn test_submit_to_locked_level_fails() {
        let manager = manager();
        let mut state = manager.new_game();
        let good = progression(vec![tonic(), dominant()]);
        let result = manager.submit(&mut state, ExerciseId::new(2, 1), good);
        assert!(matches!(result, Err(GameError::LevelLocked(_))));
        assert!(matches!(
            manager.submit(&mut state, ExerciseId::new(5, 1), progression(vec![tonic()])),
            Err(GameError::ExerciseNotFound(_))
        ));
    }

    #[test]
    fn test_save_and_reset_progress() {
        let manager = manager();
        let mut state = manager.new_game();
        let first = ExerciseId::new(1, 1);

        manager
            .save_progress(&mut state, first, progression(vec![tonic()]))
            .unwrap();
        let saved = state.level(first).unwrap().current_progression.as_ref();
        assert_eq!(saved.map(ChordProgression::len), Some(1));

        manager.reset_level(&mut state, first).unwrap();
        assert!(state.level(first).unwrap().current_progression.is_none());
        assert!(matches!(
            manager.reset_level(&mut state, ExerciseId::new(7, 2)),
            Err(GameError::LevelNotFound(_))
        ));
    }

    #[test]
    fn test_evaluate_leaves_state_alone() {
        let manager = manager();
        let state = manager.new_game();
        let submission = manager
            .evaluate(ExerciseId::new(2, 2), &progression(vec![tonic(), dominant()]))
            .unwrap();
        assert!(submission.completed);
        assert!(submission.unlocked.is_empty());
        assert_eq!(state, manager.new_game());
    }

    #[test]
    fn test_custom_scoring() {
        let manager = manager().with_scoring(ScoringPolicy::new(10, 5));
        let mut state = manager.new_game();
        let submission = manager
            .submit(&mut state, ExerciseId::new(1, 1), progression(vec![tonic(), tonic()]))
            .unwrap();
        assert_eq!(submission.score, 5);
    }
}
