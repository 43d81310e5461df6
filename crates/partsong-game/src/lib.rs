//! Level progression for partsong.
//!
//! Exercises are played as levels, two per chapter. Finishing the first
//! exercise of a chapter unlocks the second; finishing the second unlocks the
//! next chapter. A submission is scored by counting rule errors and
//! constraint violations against a [`ScoringPolicy`].

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod manager;
pub mod scoring;
pub mod state;

pub use error::{GameError, Result};
pub use manager::{GameManager, Submission};
pub use scoring::ScoringPolicy;
pub use state::{GameState, LevelProgress, LevelStatus};
