pub mod chord;
pub mod interval;
pub mod parallel;
pub mod pitch;
pub mod range;

pub use chord::{
    can_add_note_to_chord, chord_root, validate_chord, ChordReport, StructureError,
    StructureWarning,
};
pub use interval::{abs_interval, classify_motion, interval, is_octave, is_perfect_fifth, Motion};
pub use parallel::{has_parallel_fifths, has_parallel_octaves};
pub use pitch::{pitch_class, semitone, semitone_name, Pitch};
pub use range::{
    find_voice_crossings, has_voice_crossing, is_in_range, range_violation, RangeViolation,
    VoiceCrossing, VoiceRange,
};
