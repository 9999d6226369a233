// Mapping Table - (source channel, source pitch) -> (target channel, target pitch)
// Built once by the mapping builder, read-only afterwards

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Source side of a mapping entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MappingKey {
    pub channel: u8,
    pub pitch: u8,
}

/// Target side of a mapping entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MappingValue {
    pub channel: u8,
    pub pitch: u8,
}

impl MappingKey {
    pub fn new(channel: u8, pitch: u8) -> Self {
        MappingKey { channel, pitch }
    }
}

impl MappingValue {
    pub fn new(channel: u8, pitch: u8) -> Self {
        MappingValue { channel, pitch }
    }
}

/// A single serialized mapping entry (for reports)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingEntry {
    pub from: MappingKey,
    pub to: MappingValue,
}

/// Unique-key remapping table, iterated in key order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: BTreeMap<MappingKey, MappingValue>,
}

impl MappingTable {
    pub fn new() -> Self {
        MappingTable {
            entries: BTreeMap::new(),
        }
    }

    /// Insert or overwrite one entry
    pub fn insert(&mut self, key: MappingKey, value: MappingValue) {
        self.entries.insert(key, value);
    }

    /// Merge another table into this one; entries from `other` overwrite on key collision
    pub fn merge(&mut self, other: MappingTable) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, key: &MappingKey) -> Option<&MappingValue> {
        self.entries.get(key)
    }

    /// Look up by raw channel and pitch
    pub fn lookup(&self, channel: u8, pitch: u8) -> Option<MappingValue> {
        self.entries.get(&MappingKey::new(channel, pitch)).copied()
    }

    pub fn contains_key(&self, key: &MappingKey) -> bool {
        self.entries.contains_key(key)
    }

    /// True if any entry targets the given channel
    pub fn targets_channel(&self, channel: u8) -> bool {
        self.entries.values().any(|v| v.channel == channel)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MappingKey, &MappingValue)> + '_ {
        self.entries.iter()
    }

    /// Snapshot of all entries in key order
    pub fn to_entries(&self) -> Vec<MappingEntry> {
        self.entries
            .iter()
            .map(|(from, to)| MappingEntry { from: *from, to: *to })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
