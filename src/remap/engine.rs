// Remap Engine - Applies a finished mapping table to note events
// Unmapped notes pass through untouched

use super::builder::MappingBuilder;
use super::error::RemapResult;
use super::explain::RemapReport;
use super::table::MappingTable;
use crate::description::Description;
use crate::pattern::{NoteEvent, Pattern};

/// Remaps note events of a pattern onto a described instrument set
///
/// The mapping table is computed once at construction from the pattern it
/// was built for and never changes afterwards.
#[derive(Debug, Clone)]
pub struct MidiRemapper {
    description: Description,
    mapping: MappingTable,
    report: RemapReport,
}

impl MidiRemapper {
    /// Build the mapping for `pattern` against `description`
    pub fn new(description: Description, pattern: &Pattern) -> RemapResult<Self> {
        let (mapping, report) = MappingBuilder::new(&description).build(pattern)?;

        log::info!(
            "Built remapping: {} instruments, {} tracks, {} mapping entries",
            description.len(),
            pattern.tracks.len(),
            mapping.len()
        );

        Ok(MidiRemapper {
            description,
            mapping,
            report,
        })
    }

    /// Load the description document from disk and build the mapping
    pub fn from_description_file(
        path: &std::path::Path,
        pattern: &Pattern,
    ) -> RemapResult<Self> {
        let description = Description::load(path)?;
        Self::new(description, pattern)
    }

    /// Rewrite one event's channel and pitch if its note is in the table
    ///
    /// Non-note events and unmapped notes are left as they are.
    pub fn remap(&self, event: &mut NoteEvent) {
        if !event.kind.is_note() {
            return;
        }
        if let Some(target) = self.mapping.lookup(event.channel, event.pitch) {
            event.channel = target.channel;
            event.pitch = target.pitch;
        }
    }

    /// Remap every event of every track in place
    ///
    /// Ticks are made absolute for the pass and the original tick mode is
    /// restored afterwards.
    pub fn remap_pattern<'p>(&self, pattern: &'p mut Pattern) -> &'p mut Pattern {
        let was_relative = pattern.is_tick_relative();
        if was_relative {
            pattern.make_ticks_abs();
        }

        for track in &mut pattern.tracks {
            for event in &mut track.events {
                self.remap(event);
            }
        }

        if was_relative {
            pattern.make_ticks_rel();
        }
        pattern
    }

    pub fn mapping(&self) -> &MappingTable {
        &self.mapping
    }

    pub fn report(&self) -> &RemapReport {
        &self.report
    }

    pub fn description(&self) -> &Description {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::InstrumentSpec;
    use crate::pattern::{EventKind, TickMode, Track};
    use crate::remap::table::MappingValue;

    fn remapper() -> (MidiRemapper, Pattern) {
        let description = Description::new(vec![
            InstrumentSpec::new("bass", 2).with_range(Some(36), Some(60)),
        ]);
        let pattern = Pattern::from_tracks(
            vec![Track::from_events(vec![
                NoteEvent::other(0),
                NoteEvent::note_on(0, 0, 24, 100),
                NoteEvent::note_off(96, 0, 24),
                NoteEvent::note_on(0, 0, 72, 100),
                NoteEvent::note_off(96, 0, 72),
            ])],
            TickMode::Relative,
        );
        let remapper = MidiRemapper::new(description, &pattern).unwrap();
        (remapper, pattern)
    }

    #[test]
    fn test_remap_note_events() {
        let (remapper, _) = remapper();

        let mut on = NoteEvent::note_on(0, 0, 24, 100);
        remapper.remap(&mut on);
        assert_eq!((on.channel, on.pitch), (2, 36));

        let mut off = NoteEvent::note_off(0, 0, 72);
        remapper.remap(&mut off);
        assert_eq!((off.channel, off.pitch), (2, 60));
    }

    #[test]
    fn test_remap_passes_through_unmapped_and_other() {
        let (remapper, _) = remapper();

        let mut unmapped = NoteEvent::note_on(0, 7, 50, 100);
        remapper.remap(&mut unmapped);
        assert_eq!(unmapped, NoteEvent::note_on(0, 7, 50, 100));

        let mut other = NoteEvent {
            tick: 0,
            kind: EventKind::Other,
            channel: 0,
            pitch: 24,
            velocity: 0,
        };
        let before = other.clone();
        remapper.remap(&mut other);
        assert_eq!(other, before);
    }

    #[test]
    fn test_remap_pattern_restores_relative_ticks() {
        let (remapper, mut pattern) = remapper();
        let ticks_before: Vec<u32> = pattern.tracks[0].events.iter().map(|e| e.tick).collect();

        remapper.remap_pattern(&mut pattern);

        assert_eq!(pattern.tick_mode, TickMode::Relative);
        let ticks_after: Vec<u32> = pattern.tracks[0].events.iter().map(|e| e.tick).collect();
        assert_eq!(ticks_before, ticks_after);

        let notes: Vec<(u8, u8)> = pattern.tracks[0].notes().map(|e| (e.channel, e.pitch)).collect();
        assert_eq!(notes, vec![(2, 36), (2, 36), (2, 60), (2, 60)]);
    }

    #[test]
    fn test_remap_pattern_keeps_absolute_mode() {
        let (remapper, mut pattern) = remapper();
        pattern.make_ticks_abs();

        remapper.remap_pattern(&mut pattern);
        assert_eq!(pattern.tick_mode, TickMode::Absolute);
    }

    #[test]
    fn test_from_description_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"instruments": {"bass": {"output_channel": 2, "range_min": 36}}}"#)
            .unwrap();
        let (_, pattern) = remapper();

        let loaded = MidiRemapper::from_description_file(file.path(), &pattern).unwrap();
        assert_eq!(loaded.mapping().lookup(0, 24), Some(MappingValue::new(2, 36)));
        assert_eq!(loaded.mapping().lookup(0, 72), Some(MappingValue::new(2, 72)));

        let missing = MidiRemapper::from_description_file(&file.path().with_extension("nope"), &pattern);
        assert!(matches!(missing, Err(crate::remap::RemapError::Description(_))));
    }

    #[test]
    fn test_mapping_accessor() {
        let (remapper, _) = remapper();
        assert_eq!(remapper.mapping().len(), 2);
        assert_eq!(remapper.mapping().lookup(0, 72), Some(MappingValue::new(2, 60)));
        assert_eq!(remapper.description().len(), 1);
        assert_eq!(remapper.report().assignments.len(), 1);
    }
}
