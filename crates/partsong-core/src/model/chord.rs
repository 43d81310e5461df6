use serde::{Deserialize, Serialize};
use std::mem;

use super::{Note, Voice};
use crate::error::{Error, Result};
use crate::theory::semitone;

/// A four-voice chord, indexed by [`Voice`].
///
/// The label is the externally supplied chord function (for example a Roman
/// numeral such as `"V7"`); it is never inferred from the notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    /// Notes in Soprano, Alto, Tenor, Bass order.
    pub notes: [Note; 4],

    #[serde(default, alias = "roman_numeral", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// 0 = root position, 1 = first inversion, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inversion: Option<u8>,
}

impl Chord {
    #[must_use]
    pub fn new(notes: [Note; 4]) -> Self {
        Self {
            notes,
            label: None,
            inversion: None,
        }
    }

    /// Build a chord from a note list, which must hold exactly one note per voice.
    pub fn from_notes(notes: Vec<Note>) -> Result<Self> {
        let notes: [Note; 4] = notes
            .try_into()
            .map_err(|rejected: Vec<Note>| Error::ChordSize(rejected.len()))?;
        Ok(Self::new(notes))
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_inversion(mut self, inversion: u8) -> Self {
        self.inversion = Some(inversion);
        self
    }

    #[must_use]
    pub fn note(&self, voice: Voice) -> &Note {
        &self.notes[voice.index()]
    }

    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Replace one voice's note, returning the note it held before.
    pub fn set_note(&mut self, voice: Voice, note: Note) -> Note {
        mem::replace(&mut self.notes[voice.index()], note)
    }

    /// A copy of this chord with one voice replaced.
    #[must_use]
    pub fn with_note(&self, voice: Voice, note: Note) -> Self {
        let mut chord = self.clone();
        chord.set_note(voice, note);
        chord
    }

    /// Absolute semitones of each voice.
    #[must_use]
    pub fn semitones(&self) -> [i32; 4] {
        Voice::ALL.map(|voice| semitone(self.note(voice)))
    }
}
