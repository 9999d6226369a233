// Pattern Types - In-memory performance model
// Ordered tracks of timed note events with a tick-mode flag

use serde::{Deserialize, Serialize};

/// Kind discriminator for a track event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    NoteOn,
    NoteOff,
    /// Meta, sysex, controller and every other non-note event
    Other,
}

impl EventKind {
    /// True for NoteOn and NoteOff
    pub fn is_note(&self) -> bool {
        matches!(self, EventKind::NoteOn | EventKind::NoteOff)
    }

    /// Human-readable name, matching common MIDI tooling ("Note On", "Note Off")
    pub fn display_name(&self) -> &'static str {
        match self {
            EventKind::NoteOn => "Note On",
            EventKind::NoteOff => "Note Off",
            EventKind::Other => "Other",
        }
    }
}

/// A single timed event in a track
///
/// Only `channel` and `pitch` of NoteOn/NoteOff events are ever rewritten
/// by the remap engine. For `Other` events they are zero and meaningless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Tick position, relative (delta) or absolute depending on the pattern's tick mode
    pub tick: u32,

    pub kind: EventKind,

    /// MIDI channel (0-15)
    pub channel: u8,

    /// MIDI key number (0-127)
    pub pitch: u8,

    /// MIDI velocity (0-127)
    pub velocity: u8,
}

impl NoteEvent {
    /// Create a note-on event
    pub fn note_on(tick: u32, channel: u8, pitch: u8, velocity: u8) -> Self {
        NoteEvent {
            tick,
            kind: EventKind::NoteOn,
            channel,
            pitch,
            velocity,
        }
    }

    /// Create a note-off event
    pub fn note_off(tick: u32, channel: u8, pitch: u8) -> Self {
        NoteEvent {
            tick,
            kind: EventKind::NoteOff,
            channel,
            pitch,
            velocity: 0,
        }
    }

    /// Create a placeholder for any non-note event
    pub fn other(tick: u32) -> Self {
        NoteEvent {
            tick,
            kind: EventKind::Other,
            channel: 0,
            pitch: 0,
            velocity: 0,
        }
    }
}

/// An ordered sequence of events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub events: Vec<NoteEvent>,
}

impl Track {
    /// Create a new empty track
    pub fn new() -> Self {
        Track { events: Vec::new() }
    }

    /// Create a track from a list of events
    pub fn from_events(events: Vec<NoteEvent>) -> Self {
        Track { events }
    }

    /// Append an event
    pub fn push(&mut self, event: NoteEvent) {
        self.events.push(event);
    }

    /// Iterate events of one kind, in track order
    pub fn events_of_kind(&self, kind: EventKind) -> impl Iterator<Item = &NoteEvent> + '_ {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    /// Iterate note-on events, in track order
    pub fn note_ons(&self) -> impl Iterator<Item = &NoteEvent> + '_ {
        self.events_of_kind(EventKind::NoteOn)
    }

    /// Iterate note-on and note-off events, in track order
    pub fn notes(&self) -> impl Iterator<Item = &NoteEvent> + '_ {
        self.events.iter().filter(|e| e.kind.is_note())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Whether event ticks are deltas from the previous event or absolute positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickMode {
    Relative,
    Absolute,
}

/// A multi-track performance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub tracks: Vec<Track>,
    pub tick_mode: TickMode,
}

impl Pattern {
    /// Create an empty pattern with relative ticks (the SMF on-disk convention)
    pub fn new() -> Self {
        Pattern {
            tracks: Vec::new(),
            tick_mode: TickMode::Relative,
        }
    }

    /// Create a pattern from tracks with the given tick mode
    pub fn from_tracks(tracks: Vec<Track>, tick_mode: TickMode) -> Self {
        Pattern { tracks, tick_mode }
    }

    pub fn is_tick_relative(&self) -> bool {
        self.tick_mode == TickMode::Relative
    }

    /// Convert every track's delta ticks into absolute positions
    pub fn make_ticks_abs(&mut self) {
        if self.tick_mode == TickMode::Absolute {
            return;
        }

        for track in &mut self.tracks {
            let mut running = 0u32;
            for event in &mut track.events {
                running = running.saturating_add(event.tick);
                event.tick = running;
            }
        }

        self.tick_mode = TickMode::Absolute;
    }

    /// Convert every track's absolute positions back into delta ticks
    pub fn make_ticks_rel(&mut self) {
        if self.tick_mode == TickMode::Relative {
            return;
        }

        for track in &mut self.tracks {
            let mut last_tick = 0u32;
            for event in &mut track.events {
                let tick = event.tick;
                event.tick = tick.saturating_sub(last_tick);
                last_tick = tick;
            }
        }

        self.tick_mode = TickMode::Relative;
    }

    /// Total number of events across all tracks
    pub fn event_count(&self) -> usize {
        self.tracks.iter().map(|t| t.len()).sum()
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::new()
    }
}
