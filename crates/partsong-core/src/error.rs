use thiserror::Error;

use crate::model::Voice;

/// Structural misuse of the harmony API.
///
/// These indicate a caller passing malformed data. Part-writing violations are
/// never reported through this type; they come back as values inside a
/// [`ValidationResult`](crate::validation::ValidationResult).
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid pitch spelling: {0:?}")]
    InvalidPitch(String),

    #[error("octave {0} is outside the supported range -1 to 10")]
    OctaveRange(i32),

    #[error("a chord needs exactly 4 notes (one per voice), got {0}")]
    ChordSize(usize),

    #[error("voice index must be between 0 and 3, got {0}")]
    VoiceIndex(usize),

    #[error("voice order: {lower} must be a lower voice than {higher}")]
    VoiceOrder { lower: Voice, higher: Voice },

    #[error("cannot take the root of an empty note sequence")]
    EmptyNotes,

    #[error("a chord progression needs at least one chord")]
    EmptyProgression,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
