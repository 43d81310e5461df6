use anyhow::{Context, Result};
use partsong_core::constraints::constraint_hints;
use partsong_core::{ChordProgression, Exercise, ExerciseId, ExerciseSet, RuleEngine};
use partsong_game::{GameManager, Submission};
use std::path::Path;

use crate::config::Config;

fn read_set(path: &Path) -> Result<ExerciseSet> {
    ExerciseSet::read(path)
        .with_context(|| format!("Failed to read exercises from {}", path.display()))
}

fn load_set(path: &Path) -> Result<ExerciseSet> {
    ExerciseSet::load(path)
        .with_context(|| format!("Failed to load exercises from {}", path.display()))
}

fn find(set: &ExerciseSet, id: ExerciseId) -> Result<&Exercise> {
    set.exercise(id)
        .ok_or_else(|| anyhow::anyhow!("No exercise {id} in this exercise file"))
}

pub fn list_exercises(path: &Path) -> Result<()> {
    let set = load_set(path)?;

    println!("\nExercises in {}\n", path.display());
    for chapter in &set.chapters {
        println!("Chapter {}: {}", chapter.chapter, chapter.title);
        for exercise in &chapter.exercises {
            println!("  {:<6} {}", exercise.id, exercise.instructions);
        }
        println!();
    }

    Ok(())
}

fn describe(exercise: &Exercise) -> Vec<String> {
    let mut lines = vec![
        format!("Exercise {}", exercise.id),
        format!("  Key: {}", exercise.key),
        format!("  Length: {} chords", exercise.expected_length),
    ];
    if let Some(difficulty) = exercise.difficulty {
        lines.push(format!("  Difficulty: {difficulty}"));
    }
    lines.push(String::new());
    lines.push(format!("  {}", exercise.instructions));

    lines.push(String::new());
    lines.push("  Starting chords:".to_string());
    for chord in &exercise.starting_chords {
        let notes: Vec<String> = chord.notes().iter().map(ToString::to_string).collect();
        lines.push(format!("    {:<4} {}", chord.label().unwrap_or("-"), notes.join(" ")));
    }

    let hints = constraint_hints(exercise.constraints.as_ref());
    if !hints.is_empty() {
        lines.push(String::new());
        lines.push("  Constraints:".to_string());
        lines.extend(hints.into_iter().map(|hint| format!("    {hint}")));
    }

    if !exercise.hints.is_empty() {
        lines.push(String::new());
        lines.push("  Hints:".to_string());
        lines.extend(exercise.hints.iter().map(|hint| format!("    {hint}")));
    }

    lines
}

pub fn show_exercise(path: &Path, id: ExerciseId) -> Result<()> {
    let set = load_set(path)?;
    let exercise = find(&set, id)?;

    println!();
    for line in describe(exercise) {
        println!("{line}");
    }

    Ok(())
}

/// Report problems in an exercise file. Returns whether it has no errors.
pub fn lint_exercises(path: &Path) -> Result<bool> {
    let set = read_set(path)?;
    let check = set.check();

    for error in &check.errors {
        println!("error: {error}");
    }
    for warning in &check.warnings {
        println!("warning: {warning}");
    }

    let exercises = set.exercises().count();
    if check.is_valid() {
        println!("✓ {} exercise(s) in {} chapter(s) look good", exercises, set.chapters.len());
    } else {
        println!(
            "✗ {} error(s), {} warning(s) in {}",
            check.errors.len(),
            check.warnings.len(),
            path.display()
        );
    }

    Ok(check.is_valid())
}

fn print_submission(submission: &Submission) {
    println!("\nExercise {}: score {}\n", submission.level, submission.score);

    for error in &submission.validation.errors {
        println!("  ✗ {error}");
    }
    for violation in &submission.constraints.violations {
        println!("  ✗ {violation}");
    }
    if !submission.length_matches() {
        println!(
            "  ✗ wrong length: the exercise asks for exactly {} chords, got {}",
            submission.expected_length, submission.length
        );
    }

    if submission.completed {
        println!("\n✓ Completed");
    } else {
        println!("\n{} issue(s) to fix", submission.issue_count());
    }
}

fn evaluate_file(config: &Config, id: ExerciseId, file: &Path) -> Result<Submission> {
    let exercises = load_set(&config.exercises_path)?;
    let manager =
        GameManager::new(RuleEngine::with_basic_rules(), exercises).with_scoring(config.scoring());
    find(manager.exercises(), id)?;

    let progression = ChordProgression::load(file)
        .with_context(|| format!("Failed to load progression from {}", file.display()))?;
    Ok(manager.evaluate(id, &progression)?)
}

/// Score a solution for one exercise. Returns whether it completes the exercise.
pub fn submit_solution(config: &Config, id: ExerciseId, file: &Path, json: bool) -> Result<bool> {
    let submission = evaluate_file(config, id, file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&submission)?);
    } else {
        print_submission(&submission);
    }

    Ok(submission.completed)
}
