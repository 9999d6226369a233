// Assignment Report - Records how each track met each instrument
// Gives transparency into the mapping builder's choices

use serde::{Deserialize, Serialize};

use super::table::{MappingEntry, MappingTable};

/// Which rule produced an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentSource {
    /// Track's dominant channel matched an instrument's input_channel
    Direct,

    /// Track had no binding and took the best-fitting unbound instrument
    BestFit,

    /// Unbound instrument got no notes from the first pass and claimed the best-fitting track
    MissingInstrument,
}

impl AssignmentSource {
    pub fn display_name(&self) -> &'static str {
        match self {
            AssignmentSource::Direct => "direct binding",
            AssignmentSource::BestFit => "best fit",
            AssignmentSource::MissingInstrument => "missing instrument",
        }
    }
}

/// One track -> instrument decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackAssignment {
    /// Index of the track in the pattern
    pub track_index: usize,

    /// Instrument name from the description
    pub instrument: String,

    pub output_channel: u8,

    pub source: AssignmentSource,

    /// Out-of-range note events scored during the search
    /// (None for direct bindings, which are not scored)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub misses: Option<usize>,

    /// Mapping entries this decision contributed
    pub entries: usize,
}

impl TrackAssignment {
    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        let misses = match self.misses {
            Some(m) => format!(", {} out of range", m),
            None => String::new(),
        };
        format!(
            "track {} -> {} (channel {}) via {}: {} notes mapped{}",
            self.track_index,
            self.instrument,
            self.output_channel,
            self.source.display_name(),
            self.entries,
            misses
        )
    }
}

/// Complete record of a mapping build
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemapReport {
    pub assignments: Vec<TrackAssignment>,

    /// Names of unbound instruments that were forced onto a track in the second pass
    pub missing_instruments: Vec<String>,

    /// Final table, in key order
    pub mapping: Vec<MappingEntry>,
}

impl RemapReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, assignment: TrackAssignment) {
        self.assignments.push(assignment);
    }

    /// Snapshot the finished table into the report
    pub fn finish(&mut self, table: &MappingTable) {
        self.mapping = table.to_entries();
    }

    /// Human-readable summary, one line per assignment
    pub fn summary(&self) -> Vec<String> {
        self.assignments.iter().map(|a| a.summary()).collect()
    }

    /// Pretty JSON for writing next to the remapped file
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
