use serde::{Deserialize, Serialize};
use std::path::Path;

use super::Chord;
use crate::document;
use crate::error::{Error, Result};

/// An ordered sequence of chords in a key.
///
/// The key is informational; no validator reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordProgression {
    pub chords: Vec<Chord>,
    #[serde(default)]
    pub key: String,
}

impl ChordProgression {
    pub fn new(chords: Vec<Chord>, key: impl Into<String>) -> Result<Self> {
        if chords.is_empty() {
            return Err(Error::EmptyProgression);
        }
        Ok(Self {
            chords,
            key: key.into(),
        })
    }

    /// Load a progression from a TOML or JSON document.
    pub fn load(path: &Path) -> Result<Self> {
        document::load(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    #[must_use]
    pub fn chord(&self, index: usize) -> Option<&Chord> {
        self.chords.get(index)
    }

    /// Labels of every labelled chord, in progression order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.chords.iter().filter_map(Chord::label)
    }
}
