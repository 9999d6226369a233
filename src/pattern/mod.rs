// Pattern - Multi-track note performance model
// Tracks of timed note events plus the SMF adapter that fills them

pub mod types;
pub mod midi;

// Re-export main types
pub use types::{EventKind, NoteEvent, Pattern, TickMode, Track};
pub use midi::{MidiError, MidiReadOptions, apply_pattern, parse_midi, read_pattern, write_midi};
