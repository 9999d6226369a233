// MidiRemap - Automatic MIDI channel/pitch remapping onto an instrument set
// Module declarations

pub mod description;
pub mod pattern;
pub mod remap;

pub use description::{Description, DescriptionError, InstrumentSpec};
pub use pattern::{EventKind, MidiError, MidiReadOptions, NoteEvent, Pattern, TickMode, Track};
pub use remap::{
    MappingKey, MappingTable, MappingValue, MidiRemapper, RemapError, RemapReport,
    remap_midi_bytes, remap_midi_file,
};
