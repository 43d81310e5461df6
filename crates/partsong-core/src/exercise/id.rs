use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Identifies an exercise as `"{chapter}-{number}"`, e.g. `"12-2"`.
///
/// Ordering is by chapter, then number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExerciseId {
    pub chapter: u32,
    pub number: u32,
}

impl ExerciseId {
    #[must_use]
    pub const fn new(chapter: u32, number: u32) -> Self {
        Self { chapter, number }
    }

    /// The exercise that follows this one in the two-per-chapter sequence.
    #[must_use]
    pub const fn next(self) -> Self {
        if self.number == 1 {
            Self::new(self.chapter, 2)
        } else {
            Self::new(self.chapter.saturating_add(1), 1)
        }
    }
}

fn parse_part(part: &str, id: &str) -> Result<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidData(format!("invalid exercise id: {id:?}")));
    }
    part.parse()
        .map_err(|_| Error::InvalidData(format!("invalid exercise id: {id:?}")))
}

impl FromStr for ExerciseId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (chapter, number) = s
            .split_once('-')
            .ok_or_else(|| Error::InvalidData(format!("invalid exercise id: {s:?}")))?;
        Ok(Self::new(parse_part(chapter, s)?, parse_part(number, s)?))
    }
}

impl TryFrom<String> for ExerciseId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ExerciseId> for String {
    fn from(id: ExerciseId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.chapter, self.number)
    }
}
