// MIDI File Adapter - Standard MIDI File <-> Pattern using midly crate
// Reads note events out of an SMF and writes remapped notes back in place

use midly::{MidiMessage, Smf, TrackEventKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::types::{EventKind, NoteEvent, Pattern, TickMode, Track};

#[derive(Debug, Error)]
pub enum MidiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse MIDI: {0}")]
    Parse(#[from] midly::Error),

    #[error("Failed to write MIDI: {0}")]
    Write(String),

    #[error("Pattern does not match MIDI file: {0}")]
    ShapeMismatch(String),
}

/// MIDI import options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MidiReadOptions {
    /// Read NoteOn with velocity 0 as NoteOff
    /// Off by default: such events stay NoteOn, as most MIDI readers report them
    pub zero_velocity_note_off: bool,
}

impl Default for MidiReadOptions {
    fn default() -> Self {
        MidiReadOptions {
            zero_velocity_note_off: false,
        }
    }
}

/// Parse MIDI file bytes
pub fn parse_midi(bytes: &[u8]) -> Result<Smf<'_>, MidiError> {
    Ok(Smf::parse(bytes)?)
}

/// Serialize an SMF back to bytes
pub fn write_midi(smf: &Smf) -> Result<Vec<u8>, MidiError> {
    let mut bytes = Vec::new();
    smf.write(&mut bytes)
        .map_err(|e| MidiError::Write(e.to_string()))?;
    Ok(bytes)
}

/// Read a MIDI file from disk
pub fn read_midi_file(path: &Path) -> Result<Vec<u8>, MidiError> {
    Ok(std::fs::read(path)?)
}

/// Build a pattern mirroring the SMF one track and one event at a time
///
/// Ticks are the SMF delta times, so the pattern comes back in relative mode.
pub fn read_pattern(smf: &Smf, options: &MidiReadOptions) -> Pattern {
    let tracks = smf
        .tracks
        .iter()
        .map(|smf_track| {
            let events = smf_track
                .iter()
                .map(|event| {
                    let tick = event.delta.as_int();
                    match &event.kind {
                        TrackEventKind::Midi { channel, message } => match message {
                            MidiMessage::NoteOn { key, vel } => {
                                if options.zero_velocity_note_off && vel.as_int() == 0 {
                                    NoteEvent::note_off(tick, channel.as_int(), key.as_int())
                                } else {
                                    NoteEvent::note_on(tick, channel.as_int(), key.as_int(), vel.as_int())
                                }
                            }
                            MidiMessage::NoteOff { key, vel } => NoteEvent {
                                tick,
                                kind: EventKind::NoteOff,
                                channel: channel.as_int(),
                                pitch: key.as_int(),
                                velocity: vel.as_int(),
                            },
                            _ => NoteEvent::other(tick),
                        },
                        _ => NoteEvent::other(tick),
                    }
                })
                .collect();
            Track::from_events(events)
        })
        .collect();

    Pattern::from_tracks(tracks, TickMode::Relative)
}

/// Write the channel and key of every note event in the pattern back onto the SMF
///
/// The pattern must have been produced by `read_pattern` on the same SMF.
/// Timing is never written back; only note channel/key change.
pub fn apply_pattern(smf: &mut Smf, pattern: &Pattern) -> Result<(), MidiError> {
    if smf.tracks.len() != pattern.tracks.len() {
        return Err(MidiError::ShapeMismatch(format!(
            "{} tracks in file, {} in pattern",
            smf.tracks.len(),
            pattern.tracks.len()
        )));
    }

    for (index, (smf_track, track)) in smf.tracks.iter_mut().zip(&pattern.tracks).enumerate() {
        if smf_track.len() != track.len() {
            return Err(MidiError::ShapeMismatch(format!(
                "track {} has {} events in file, {} in pattern",
                index,
                smf_track.len(),
                track.len()
            )));
        }

        for (smf_event, event) in smf_track.iter_mut().zip(&track.events) {
            if !event.kind.is_note() {
                continue;
            }
            if let TrackEventKind::Midi { channel, message } = &mut smf_event.kind {
                match message {
                    MidiMessage::NoteOn { key, .. } | MidiMessage::NoteOff { key, .. } => {
                        *channel = event.channel.min(15).into();
                        *key = event.pitch.min(127).into();
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}
