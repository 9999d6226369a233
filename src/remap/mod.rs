// Remap - Automatic channel/pitch remapping onto an instrument set
// Infers each track's channel, matches tracks to instruments, folds pitches into range

pub mod histogram;
pub mod range;
pub mod table;
pub mod matcher;
pub mod builder;
pub mod engine;
pub mod explain;
pub mod file;
pub mod error;

// Re-export main types
pub use histogram::dominant_channel;
pub use range::{fold_pitch, instrument_mapping, range_mapping};
pub use table::{MappingEntry, MappingKey, MappingTable, MappingValue};
pub use matcher::{best_instrument_for_track, best_track_for_instrument, direct_mapping};
pub use builder::{MappingBuilder, missing_instruments};
pub use engine::MidiRemapper;
pub use explain::{AssignmentSource, RemapReport, TrackAssignment};
pub use file::{remap_midi_bytes, remap_midi_file};
pub use error::{RemapError, RemapResult};
