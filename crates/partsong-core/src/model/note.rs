use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::theory::Pitch;

/// Lowest octave a note may be written in.
pub const MIN_OCTAVE: i32 = -1;
/// Highest octave a note may be written in.
pub const MAX_OCTAVE: i32 = 10;

fn default_duration() -> String {
    "w".to_string()
}

/// A single written note.
///
/// Notes deserialize either from a table (`{ pitch = "F#", octave = 4 }`) or
/// from the compact string form `"F#4"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "NoteRepr")]
pub struct Note {
    pub pitch: Pitch,
    pub octave: i32,
    /// Duration token ("w", "h", "q", ...). Not used by validation.
    pub duration: String,
}

impl Note {
    /// Build a whole note from a spelling and an octave in
    /// `MIN_OCTAVE..=MAX_OCTAVE`.
    pub fn new(spelling: &str, octave: i32) -> Result<Self> {
        if !(MIN_OCTAVE..=MAX_OCTAVE).contains(&octave) {
            return Err(Error::OctaveRange(octave));
        }
        Ok(Self {
            pitch: spelling.parse()?,
            octave,
            duration: default_duration(),
        })
    }

    #[must_use]
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = duration.into();
        self
    }
}

impl FromStr for Note {
    type Err = Error;

    /// Parse `"<spelling><octave>"`, e.g. `"C4"`, `"Bb3"`, `"G#-1"`.
    fn from_str(s: &str) -> Result<Self> {
        let split = s
            .char_indices()
            .skip(1)
            .find(|(_, c)| c.is_ascii_digit() || *c == '-')
            .map(|(i, _)| i)
            .ok_or_else(|| Error::InvalidData(format!("note {s:?} has no octave")))?;
        let (spelling, octave) = s.split_at(split);
        let octave = octave
            .parse()
            .map_err(|_| Error::InvalidData(format!("note {s:?} has an invalid octave")))?;
        Self::new(spelling, octave)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch, self.octave)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NoteRepr {
    Compact(String),
    Full {
        pitch: String,
        octave: i32,
        #[serde(default = "default_duration")]
        duration: String,
    },
}

impl TryFrom<NoteRepr> for Note {
    type Error = Error;

    fn try_from(repr: NoteRepr) -> Result<Self> {
        match repr {
            NoteRepr::Compact(s) => s.parse(),
            NoteRepr::Full {
                pitch,
                octave,
                duration,
            } => Ok(Self::new(&pitch, octave)?.with_duration(duration)),
        }
    }
}
