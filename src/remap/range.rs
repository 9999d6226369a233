// Range Mapper - Octave-folds a track's pitches into an instrument range
// Produces one mapping entry per distinct (channel, pitch) the track plays

use super::table::{MappingKey, MappingTable, MappingValue};
use crate::description::InstrumentSpec;
use crate::pattern::Track;

/// Semitones per octave
const OCTAVE: i16 = 12;

/// Highest MIDI key number
const MAX_PITCH: i16 = 127;

/// Transpose a pitch by whole octaves into [lower, upper]
///
/// The lower bound is applied first, then the upper bound. With a range
/// narrower than an octave the result can still sit below `lower` after the
/// upper fold. The result is clamped to the MIDI key range.
pub fn fold_pitch(pitch: u8, lower: Option<u8>, upper: Option<u8>) -> u8 {
    let mut folded = pitch as i16;

    if let Some(lower) = lower {
        while folded < lower as i16 {
            folded += OCTAVE;
        }
    }
    if let Some(upper) = upper {
        while folded > upper as i16 {
            folded -= OCTAVE;
        }
    }

    folded.clamp(0, MAX_PITCH) as u8
}

/// Map every note-on (channel, pitch) of a track onto `target_channel`,
/// folding pitches into the optional range
pub fn range_mapping(
    track: &Track,
    target_channel: u8,
    lower: Option<u8>,
    upper: Option<u8>,
) -> MappingTable {
    let mut mapping = MappingTable::new();

    for event in track.note_ons() {
        let key = MappingKey::new(event.channel, event.pitch);
        if mapping.contains_key(&key) {
            continue;
        }
        let pitch = fold_pitch(event.pitch, lower, upper);
        mapping.insert(key, MappingValue::new(target_channel, pitch));
    }

    mapping
}

/// Range mapping of a track onto an instrument's output channel and range
pub fn instrument_mapping(track: &Track, instrument: &InstrumentSpec) -> MappingTable {
    range_mapping(
        track,
        instrument.output_channel,
        instrument.range_min,
        instrument.range_max,
    )
}
