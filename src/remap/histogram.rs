// Channel Histogram - Dominant channel of a track
// Counts note-on events per channel and picks the most used one

use crate::pattern::Track;

/// Find the channel carrying the most note-on events in a track
///
/// Among channels tied at the maximum count, the one whose first note-on
/// appears latest in the track wins. Returns None for a track without
/// note-on events.
pub fn dominant_channel(track: &Track) -> Option<u8> {
    let mut counts = [0usize; 256];
    // Channels in order of first appearance
    let mut seen: Vec<u8> = Vec::new();

    for event in track.note_ons() {
        let slot = &mut counts[event.channel as usize];
        if *slot == 0 {
            seen.push(event.channel);
        }
        *slot += 1;
    }

    let mut best: Option<(u8, usize)> = None;
    for &channel in &seen {
        let count = counts[channel as usize];
        match best {
            Some((_, best_count)) if count < best_count => {}
            _ => best = Some((channel, count)),
        }
    }

    best.map(|(channel, _)| channel)
}
