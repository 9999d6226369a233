// MIDI File Remapping - Parse, remap and re-encode Standard MIDI Files

use std::path::Path;

use super::engine::MidiRemapper;
use super::error::RemapResult;
use super::explain::RemapReport;
use crate::description::Description;
use crate::pattern::{self, MidiReadOptions};

/// Remap MIDI file bytes against a description
///
/// Returns the re-encoded file and the report of how tracks were assigned.
pub fn remap_midi_bytes(
    bytes: &[u8],
    description: &Description,
    options: &MidiReadOptions,
) -> RemapResult<(Vec<u8>, RemapReport)> {
    let mut smf = pattern::parse_midi(bytes)?;
    let mut performance = pattern::read_pattern(&smf, options);

    let remapper = MidiRemapper::new(description.clone(), &performance)?;
    remapper.remap_pattern(&mut performance);

    pattern::apply_pattern(&mut smf, &performance)?;
    let out = pattern::write_midi(&smf)?;

    Ok((out, remapper.report().clone()))
}

/// Remap a MIDI file on disk and write the result to `output`
pub fn remap_midi_file(
    input: &Path,
    output: &Path,
    description: &Description,
    options: &MidiReadOptions,
) -> RemapResult<RemapReport> {
    let bytes = pattern::midi::read_midi_file(input)?;
    let (out, report) = remap_midi_bytes(&bytes, description, options)?;
    std::fs::write(output, out).map_err(pattern::MidiError::from)?;

    log::info!(
        "Remapped {} -> {} ({} assignments)",
        input.display(),
        output.display(),
        report.assignments.len()
    );
    Ok(report)
}
