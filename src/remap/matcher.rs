// Track/Instrument Matching - Direct channel bindings and best-fit searches
// Best fit = fewest note events outside an instrument's pitch range

use super::error::{RemapError, RemapResult};
use super::histogram::dominant_channel;
use super::range::instrument_mapping;
use super::table::MappingTable;
use crate::description::{Description, InstrumentSpec};
use crate::pattern::{NoteEvent, Pattern, Track};

/// Count how many of the given events fall outside the instrument's range
pub fn count_misses<'a>(
    events: impl Iterator<Item = &'a NoteEvent>,
    instrument: &InstrumentSpec,
) -> usize {
    events.map(|e| instrument.misses_for(e.pitch)).sum()
}

/// Index and score of the lowest-scoring candidate; ties keep the first seen
fn argmin_first(scores: impl Iterator<Item = usize>) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for (index, score) in scores.enumerate() {
        match best {
            Some((_, best_score)) if score >= best_score => {}
            _ => best = Some((index, score)),
        }
    }
    best
}

/// Find the instrument explicitly bound to the track's dominant channel
///
/// Instruments are scanned in declaration order and the first whose
/// `input_channel` matches is used. None if the track has no note-ons
/// or nothing is bound to its channel.
pub fn direct_mapping<'d>(
    track: &Track,
    description: &'d Description,
) -> Option<(&'d InstrumentSpec, MappingTable)> {
    let channel = dominant_channel(track)?;

    description
        .bound()
        .find(|instrument| instrument.input_channel == Some(channel))
        .map(|instrument| (instrument, instrument_mapping(track, instrument)))
}

/// Pick the unbound instrument that leaves the fewest of the track's note-ons out of range
///
/// Bound instruments never take part, so a track cannot claim an instrument
/// reserved for another channel. Returns the instrument and its miss count.
pub fn best_instrument_for_track<'d>(
    track: &Track,
    description: &'d Description,
) -> RemapResult<(&'d InstrumentSpec, usize)> {
    let candidates: Vec<&InstrumentSpec> = description.unbound().collect();

    let (index, misses) = argmin_first(
        candidates
            .iter()
            .map(|instrument| count_misses(track.note_ons(), instrument)),
    )
    .ok_or(RemapError::NoFallbackInstrument)?;

    Ok((candidates[index], misses))
}

/// Pick the track whose notes (on and off) best fit an unbound instrument's range
///
/// Returns the track index and its miss count. None for a bound instrument
/// (already served by its channel) or an empty pattern.
pub fn best_track_for_instrument(
    instrument: &InstrumentSpec,
    pattern: &Pattern,
) -> Option<(usize, usize)> {
    if instrument.is_bound() {
        return None;
    }

    argmin_first(
        pattern
            .tracks
            .iter()
            .map(|track| count_misses(track.notes(), instrument)),
    )
}
