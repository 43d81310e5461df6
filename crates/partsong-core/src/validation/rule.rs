//! The rule abstraction shared by every part-writing check.

use std::fmt;

use super::types::{ValidationError, ValidationResult};
use crate::model::{ChordProgression, Voice};

/// Priority bands. Lower values run, and sort, first.
///
/// New rules must slot into the band that matches what they check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RulePriority {
    /// Range, crossing and other single-chord layout problems (100-199).
    Structure = 100,
    /// Parallels and other chord-to-chord motion (200-299).
    VoiceLeading = 200,
    /// Doubling, omission and other chord-internal checks (300-399).
    Chord = 300,
    /// Style-specific or advanced rules (400-499).
    Style = 400,
}

impl RulePriority {
    #[must_use]
    pub const fn value(self) -> u32 {
        self as u32
    }
}

/// A part-writing rule.
///
/// `validate` is called once for every chord index of a progression. Rules
/// that look at a single chord check `progression.chords[chord_index]`;
/// rules that look at a transition compare it with the chord before and
/// succeed trivially at index 0.
pub trait Rule: fmt::Debug + Send + Sync {
    /// Unique id. Registering a rule with an existing id replaces it.
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    /// Chapter that introduces the rule (1-based).
    fn chapter(&self) -> u32;

    fn priority(&self) -> u32;

    fn description(&self) -> &str {
        ""
    }

    /// Text shown with each error, pointing back to the chapter.
    fn chapter_reference(&self) -> String {
        format!("Chapter {}", self.chapter())
    }

    fn validate(&self, progression: &ChordProgression, chord_index: usize) -> ValidationResult;

    /// Build an error stamped with this rule's metadata.
    fn violation(
        &self,
        message: String,
        voices: Vec<Voice>,
        chords: Vec<usize>,
    ) -> ValidationError {
        ValidationError {
            rule_id: self.id().to_string(),
            rule_name: self.name().to_string(),
            message,
            chapter_reference: self.chapter_reference(),
            affected_voices: voices,
            affected_chords: chords,
        }
    }
}

type CheckFn = dyn Fn(&ChordProgression, usize) -> ValidationResult + Send + Sync;

/// A rule built from a closure and its metadata.
pub struct FnRule {
    id: String,
    name: String,
    chapter: u32,
    priority: u32,
    description: String,
    check: Box<CheckFn>,
}

impl FnRule {
    pub fn new<F>(
        id: impl Into<String>,
        name: impl Into<String>,
        chapter: u32,
        priority: u32,
        check: F,
    ) -> Self
    where
        F: Fn(&ChordProgression, usize) -> ValidationResult + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            name: name.into(),
            chapter,
            priority,
            description: String::new(),
            check: Box::new(check),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl fmt::Debug for FnRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule")
            .field("id", &self.id)
            .field("chapter", &self.chapter)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

impl Rule for FnRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn chapter(&self) -> u32 {
        self.chapter
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn validate(&self, progression: &ChordProgression, chord_index: usize) -> ValidationResult {
        (self.check)(progression, chord_index)
    }
}
