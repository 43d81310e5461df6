use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// One of the four parts, in register order (Soprano highest).
///
/// The ordinal is the voice's index into a [`Chord`](super::Chord); comparing
/// voices compares those ordinals, so `Soprano < Bass`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    Soprano = 0,
    Alto = 1,
    Tenor = 2,
    Bass = 3,
}

impl Voice {
    pub const ALL: [Voice; 4] = [Voice::Soprano, Voice::Alto, Voice::Tenor, Voice::Bass];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL.get(index).copied().ok_or(Error::VoiceIndex(index))
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Soprano => "Soprano",
            Self::Alto => "Alto",
            Self::Tenor => "Tenor",
            Self::Bass => "Bass",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
