// Mapping Builder - Two-pass construction of the complete mapping table
// Pass 1 maps every track (direct binding, else best-fit instrument);
// pass 2 forces each still-unused unbound instrument onto its best-fitting track

use super::error::{RemapError, RemapResult};
use super::explain::{AssignmentSource, RemapReport, TrackAssignment};
use super::matcher::{best_instrument_for_track, best_track_for_instrument, direct_mapping};
use super::range::instrument_mapping;
use super::table::MappingTable;
use crate::description::{Description, InstrumentSpec};
use crate::pattern::Pattern;

/// Builds a mapping table for one pattern against one description
pub struct MappingBuilder<'d> {
    description: &'d Description,
}

impl<'d> MappingBuilder<'d> {
    pub fn new(description: &'d Description) -> Self {
        MappingBuilder { description }
    }

    /// Compute the mapping table and a report of every assignment made
    ///
    /// Later merges overwrite earlier entries with the same key.
    pub fn build(&self, pattern: &Pattern) -> RemapResult<(MappingTable, RemapReport)> {
        if self.description.is_empty() {
            log::warn!("Cannot build mapping: description has no instruments");
            return Err(RemapError::NoInstruments);
        }

        let mut table = MappingTable::new();
        let mut report = RemapReport::new();

        // Pass 1: every track with notes gets an instrument
        for (track_index, track) in pattern.tracks.iter().enumerate() {
            if let Some((instrument, mapping)) = direct_mapping(track, self.description) {
                report.record(assignment(track_index, instrument, AssignmentSource::Direct, None, &mapping));
                table.merge(mapping);
                continue;
            }

            // Nothing to map, so no fallback instrument is needed
            if track.note_ons().next().is_none() {
                continue;
            }

            let (instrument, misses) = best_instrument_for_track(track, self.description)
                .map_err(|e| {
                    log::warn!("Track {} has no direct binding: {}", track_index, e);
                    e
                })?;
            let mapping = instrument_mapping(track, instrument);
            report.record(assignment(track_index, instrument, AssignmentSource::BestFit, Some(misses), &mapping));
            table.merge(mapping);
        }

        // Pass 2: unbound instruments nothing was routed to
        let missing = missing_instruments(&table, self.description);
        for instrument in missing {
            report.missing_instruments.push(instrument.name.clone());

            let Some((track_index, misses)) = best_track_for_instrument(instrument, pattern) else {
                continue;
            };
            let mapping = instrument_mapping(&pattern.tracks[track_index], instrument);
            report.record(assignment(
                track_index,
                instrument,
                AssignmentSource::MissingInstrument,
                Some(misses),
                &mapping,
            ));
            table.merge(mapping);
        }

        for line in report.summary() {
            log::debug!("{}", line);
        }

        report.finish(&table);
        Ok((table, report))
    }
}

/// Unbound instruments whose output channel no table entry targets yet
pub fn missing_instruments<'d>(
    table: &MappingTable,
    description: &'d Description,
) -> Vec<&'d InstrumentSpec> {
    description
        .unbound()
        .filter(|instrument| !table.targets_channel(instrument.output_channel))
        .collect()
}

fn assignment(
    track_index: usize,
    instrument: &InstrumentSpec,
    source: AssignmentSource,
    misses: Option<usize>,
    mapping: &MappingTable,
) -> TrackAssignment {
    TrackAssignment {
        track_index,
        instrument: instrument.name.clone(),
        output_channel: instrument.output_channel,
        source,
        misses,
        entries: mapping.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{NoteEvent, TickMode, Track};
    use crate::remap::table::MappingValue;

    fn track(channel: u8, pitches: &[u8]) -> Track {
        let mut events = Vec::new();
        for &p in pitches {
            events.push(NoteEvent::note_on(0, channel, p, 100));
            events.push(NoteEvent::note_off(10, channel, p));
        }
        Track::from_events(events)
    }

    fn pattern(tracks: Vec<Track>) -> Pattern {
        Pattern::from_tracks(tracks, TickMode::Relative)
    }

    #[test]
    fn test_empty_description_fails() {
        let description = Description::default();
        let result = MappingBuilder::new(&description).build(&pattern(vec![track(0, &[60])]));
        assert!(matches!(result, Err(RemapError::NoInstruments)));
    }

    #[test]
    fn test_no_fallback_fails() {
        let description = Description::new(vec![InstrumentSpec::new("drums", 9).with_input_channel(9)]);
        let result = MappingBuilder::new(&description).build(&pattern(vec![track(0, &[60])]));
        assert!(matches!(result, Err(RemapError::NoFallbackInstrument)));
    }

    #[test]
    fn test_noteless_track_needs_no_fallback() {
        let description = Description::new(vec![InstrumentSpec::new("drums", 9).with_input_channel(9)]);
        let meta = Track::from_events(vec![NoteEvent::other(0)]);

        let (table, report) = MappingBuilder::new(&description)
            .build(&pattern(vec![meta, track(9, &[36, 38])]))
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(report.assignments.len(), 1);
        assert_eq!(report.assignments[0].source, AssignmentSource::Direct);
    }

    #[test]
    fn test_total_coverage_of_note_ons() {
        let description = Description::new(vec![
            InstrumentSpec::new("drums", 9).with_input_channel(9),
            InstrumentSpec::new("bass", 1).with_range(Some(28), Some(55)),
            InstrumentSpec::new("lead", 2).with_range(Some(60), Some(96)),
        ]);
        let p = pattern(vec![
            track(9, &[36, 38, 42]),
            track(0, &[30, 35, 40]),
            track(3, &[70, 72, 100, 20]),
            Track::new(),
        ]);

        let (table, _) = MappingBuilder::new(&description).build(&p).unwrap();

        for t in &p.tracks {
            for event in t.note_ons() {
                assert!(table.lookup(event.channel, event.pitch).is_some());
            }
        }
    }

    #[test]
    fn test_missing_instrument_claims_best_track() {
        let description = Description::new(vec![
            InstrumentSpec::new("bass", 1).with_range(Some(30), Some(50)),
            InstrumentSpec::new("lead", 2).with_range(Some(60), Some(80)),
        ]);
        // Both tracks fit bass better (first at minimum) so lead gets nothing in pass 1
        let p = pattern(vec![track(0, &[40, 45]), track(4, &[50, 70])]);

        let (table, report) = MappingBuilder::new(&description).build(&p).unwrap();

        assert_eq!(report.missing_instruments, vec!["lead".to_string()]);
        let forced = report.assignments.last().unwrap();
        assert_eq!(forced.source, AssignmentSource::MissingInstrument);
        assert_eq!(forced.instrument, "lead");
        assert_eq!(forced.track_index, 1);

        // Second pass overwrites the track's pass-1 entries
        assert_eq!(table.lookup(4, 70), Some(MappingValue::new(2, 70)));
        assert_eq!(table.lookup(4, 50), Some(MappingValue::new(2, 62)));
        assert_eq!(table.lookup(0, 40), Some(MappingValue::new(1, 40)));
    }

    #[test]
    fn test_missing_instrument_overrides_direct_track() {
        let description = Description::new(vec![
            InstrumentSpec::new("keys", 5).with_input_channel(1),
            InstrumentSpec::new("spare", 7),
        ]);
        let (table, report) = MappingBuilder::new(&description)
            .build(&pattern(vec![track(1, &[60])]))
            .unwrap();

        // The only track is claimed by the unused instrument in pass 2
        assert_eq!(report.assignments.len(), 2);
        assert_eq!(table.lookup(1, 60), Some(MappingValue::new(7, 60)));
    }

    #[test]
    fn test_missing_instruments_ignores_bound() {
        let description = Description::new(vec![
            InstrumentSpec::new("drums", 9).with_input_channel(9),
            InstrumentSpec::new("pad", 3),
        ]);
        let missing = missing_instruments(&MappingTable::new(), &description);
        let names: Vec<&str> = missing.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["pad"]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let description = Description::new(vec![
            InstrumentSpec::new("a", 1).with_range(Some(40), Some(60)),
            InstrumentSpec::new("b", 2).with_range(Some(40), Some(60)),
        ]);
        let p = pattern(vec![track(0, &[50]), track(1, &[55])]);

        let (first, _) = MappingBuilder::new(&description).build(&p).unwrap();
        let (second, _) = MappingBuilder::new(&description).build(&p).unwrap();
        assert_eq!(first, second);
    }
}
