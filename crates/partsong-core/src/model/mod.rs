pub mod chord;
pub mod note;
pub mod progression;
pub mod voice;

pub use chord::Chord;
pub use note::Note;
pub use progression::ChordProgression;
pub use voice::Voice;
