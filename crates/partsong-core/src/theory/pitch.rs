//! Pitch spellings and absolute semitone arithmetic.
//!
//! A [`Pitch`] is a letter plus an optional accidental (single or double sharp
//! or flat). Enharmonic spellings (`C#`/`Db`, `B#`/`C`, `Cb`/`B`) map to the
//! same pitch class. Parsing is the only place an unknown spelling is
//! rejected; every [`Note`] holds an already-valid pitch, so the arithmetic in
//! this module and everything built on it is infallible.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::Note;

/// Semitones per octave.
pub const OCTAVE: i32 = 12;

/// Sharp spellings used when rendering an absolute semitone back to a name.
const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// The seven natural note letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    const fn natural_class(self) -> i32 {
        match self {
            Self::C => 0,
            Self::D => 2,
            Self::E => 4,
            Self::F => 5,
            Self::G => 7,
            Self::A => 9,
            Self::B => 11,
        }
    }

    const fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'E' => Some(Self::E),
            'F' => Some(Self::F),
            'G' => Some(Self::G),
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            _ => None,
        }
    }

    const fn as_char(self) -> char {
        match self {
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
            Self::G => 'G',
            Self::A => 'A',
            Self::B => 'B',
        }
    }
}

/// Accidentals accepted in a spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accidental {
    DoubleFlat,
    Flat,
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    const fn offset(self) -> i32 {
        match self {
            Self::DoubleFlat => -2,
            Self::Flat => -1,
            Self::Natural => 0,
            Self::Sharp => 1,
            Self::DoubleSharp => 2,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "" => Some(Self::Natural),
            "#" => Some(Self::Sharp),
            "##" => Some(Self::DoubleSharp),
            "b" => Some(Self::Flat),
            "bb" => Some(Self::DoubleFlat),
            _ => None,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::DoubleFlat => "bb",
            Self::Flat => "b",
            Self::Natural => "",
            Self::Sharp => "#",
            Self::DoubleSharp => "##",
        }
    }
}

/// A validated pitch spelling such as `"F#"` or `"Bb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pitch {
    letter: Letter,
    accidental: Accidental,
}

impl Pitch {
    #[must_use]
    pub const fn new(letter: Letter, accidental: Accidental) -> Self {
        Self { letter, accidental }
    }

    #[must_use]
    pub const fn letter(&self) -> Letter {
        self.letter
    }

    #[must_use]
    pub const fn accidental(&self) -> Accidental {
        self.accidental
    }

    /// Pitch class in `0..12`, independent of register.
    #[must_use]
    pub const fn class(&self) -> u8 {
        (self.letter.natural_class() + self.accidental.offset()).rem_euclid(OCTAVE) as u8
    }
}

impl FromStr for Pitch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        let letter = chars
            .next()
            .and_then(Letter::from_char)
            .ok_or_else(|| Error::InvalidPitch(s.to_string()))?;
        let accidental =
            Accidental::parse(chars.as_str()).ok_or_else(|| Error::InvalidPitch(s.to_string()))?;
        Ok(Self::new(letter, accidental))
    }
}

impl TryFrom<String> for Pitch {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Pitch> for String {
    fn from(pitch: Pitch) -> Self {
        pitch.to_string()
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter.as_char(), self.accidental.as_str())
    }
}

/// Look up the pitch class of a spelling.
pub fn pitch_class(spelling: &str) -> Result<u8> {
    Ok(spelling.parse::<Pitch>()?.class())
}

/// Absolute semitone count of a note, counted from C0.
///
/// The octave number is taken as written: `B#4` lands on the same value as
/// `C4`, not `C5`. Saturates for octaves far outside the parseable range.
#[must_use]
pub fn semitone(note: &Note) -> i32 {
    note.octave
        .saturating_mul(OCTAVE)
        .saturating_add(i32::from(note.pitch.class()))
}

/// Render an absolute semitone count with sharp spelling, e.g. `48` → `"C4"`.
#[must_use]
pub fn semitone_name(semitones: i32) -> String {
    let octave = semitones.div_euclid(OCTAVE);
    let class = semitones.rem_euclid(OCTAVE) as usize;
    format!("{}{}", SHARP_NAMES[class], octave)
}
