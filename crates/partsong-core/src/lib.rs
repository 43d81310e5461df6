//! Core harmony model for partsong.
//!
//! This crate defines the four-voice chord model, the music-theory primitives
//! (pitch classes, intervals, motion, voice ranges, chord structure), the
//! chapter-cumulative part-writing rule engine, the exercise constraint
//! checker, and the exercise data model.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod constraints;
pub mod document;
pub mod error;
pub mod exercise;
pub mod model;
pub mod theory;
pub mod validation;

pub use constraints::{validate_constraints, ConstraintReport, ConstraintViolation, ViolationKind};
pub use error::{Error, Result};
pub use exercise::{Exercise, ExerciseConstraints, ExerciseId, ExerciseSet};
pub use model::{Chord, ChordProgression, Note, Voice};
pub use theory::Pitch;
pub use validation::{RuleEngine, ValidationError, ValidationResult};
