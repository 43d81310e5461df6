//! Exercise definitions and the exercise data file.
//!
//! An exercise data file groups exercises by chapter, two per chapter:
//!
//! ```toml
//! version = "1.0"
//!
//! [[chapters]]
//! chapter = 1
//! title = "Chord connection basics"
//!
//! [[chapters.exercises]]
//! id = "1-1"
//! chapter = 1
//! number = 1
//! instructions = "Connect I to V in C major."
//! key = "C major"
//! expected_length = 2
//! ```

mod check;
mod id;

pub use check::{validate_chapter, validate_exercise, DataCheck};
pub use id::ExerciseId;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::document;
use crate::error::{Error, Result};
use crate::model::{Chord, ChordProgression};

/// Extra requirements an exercise places on a submitted progression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseConstraints {
    /// Chord labels that must appear at least once.
    #[serde(default)]
    pub required_chords: Vec<String>,

    /// Chord labels that may not appear.
    #[serde(default)]
    pub forbidden_chords: Vec<String>,

    /// Rule ids this exercise focuses on.
    #[serde(default)]
    pub specific_rules: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

/// One part-writing exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// `"{chapter}-{number}"`. Kept as written so malformed ids can be reported.
    pub id: String,

    pub chapter: u32,

    /// 1 or 2.
    pub number: u32,

    #[serde(default)]
    pub instructions: String,

    #[serde(default)]
    pub key: String,

    /// Chords given to the student, counted in `expected_length`.
    #[serde(default)]
    pub starting_chords: Vec<Chord>,

    /// Total chord count of a finished answer.
    pub expected_length: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<ExerciseConstraints>,

    /// Reference answer.
    #[serde(default)]
    pub solution: ChordProgression,

    /// 1 (easiest) to 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,

    #[serde(default)]
    pub hints: Vec<String>,
}

impl Exercise {
    /// The parsed id, if `id` is well formed.
    #[must_use]
    pub fn exercise_id(&self) -> Option<ExerciseId> {
        self.id.parse().ok()
    }

    /// The starting chords as a progression, for students to extend.
    #[must_use]
    pub fn starting_progression(&self) -> ChordProgression {
        ChordProgression {
            chords: self.starting_chords.clone(),
            key: self.key.clone(),
        }
    }
}

/// Exercises for one chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterData {
    pub chapter: u32,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub exercises: Vec<Exercise>,

    /// Concepts the chapter introduces.
    #[serde(default)]
    pub concepts: Vec<String>,
}

/// The contents of an exercise data file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseSet {
    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub chapters: Vec<ChapterData>,
}

impl ExerciseSet {
    /// Parse an exercise file (TOML, or JSON by extension) without checking it.
    pub fn read(path: &Path) -> Result<Self> {
        document::load(path)
    }

    /// Parse an exercise file and reject it if any chapter fails its checks.
    ///
    /// Warnings are logged and otherwise ignored.
    pub fn load(path: &Path) -> Result<Self> {
        let set = Self::read(path)?;
        let check = set.check();
        for warning in &check.warnings {
            log::warn!("{}: {}", path.display(), warning);
        }
        if !check.is_valid() {
            return Err(Error::InvalidData(format!(
                "invalid exercise data in {}:\n{}",
                path.display(),
                check.errors.join("\n")
            )));
        }
        log::info!(
            "Loaded {} exercise(s) in {} chapter(s) from {}",
            set.exercises().count(),
            set.chapters.len(),
            path.display()
        );
        Ok(set)
    }

    /// Run [`validate_chapter`] over every chapter.
    #[must_use]
    pub fn check(&self) -> DataCheck {
        let mut check = DataCheck::default();
        for chapter in &self.chapters {
            check.absorb(validate_chapter(chapter), &format!("chapter {}", chapter.chapter));
        }
        check
    }

    #[must_use]
    pub fn exercise(&self, id: ExerciseId) -> Option<&Exercise> {
        self.exercises().find(|e| e.exercise_id() == Some(id))
    }

    /// Every exercise, in file order.
    pub fn exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.chapters.iter().flat_map(|c| c.exercises.iter())
    }

    #[must_use]
    pub fn chapter(&self, chapter: u32) -> Option<&ChapterData> {
        self.chapters.iter().find(|c| c.chapter == chapter)
    }

    /// Chapter numbers present, ascending.
    #[must_use]
    pub fn chapter_numbers(&self) -> Vec<u32> {
        let mut numbers: Vec<u32> = self.chapters.iter().map(|c| c.chapter).collect();
        numbers.sort_unstable();
        numbers.dedup();
        numbers
    }
}
