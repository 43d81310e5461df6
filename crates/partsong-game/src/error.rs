use partsong_core::ExerciseId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("no level {0} in this game")]
    LevelNotFound(ExerciseId),

    #[error("level {0} is still locked")]
    LevelLocked(ExerciseId),

    #[error("no exercise {0} in the exercise set")]
    ExerciseNotFound(ExerciseId),

    #[error(transparent)]
    Core(#[from] partsong_core::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
