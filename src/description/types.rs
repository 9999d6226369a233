// Description Types - Target instrument set
// Each instrument names an output channel and an optional source binding and pitch range

use serde::{Deserialize, Serialize};

/// One target instrument from the description document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentSpec {
    /// Key of the instrument in the description's `instruments` object
    pub name: String,

    /// Source channel explicitly routed to this instrument
    /// None = no binding, the instrument is filled by best-fit search
    pub input_channel: Option<u8>,

    /// Channel the instrument listens on
    pub output_channel: u8,

    /// Lowest playable pitch
    pub range_min: Option<u8>,

    /// Highest playable pitch
    pub range_max: Option<u8>,
}

impl InstrumentSpec {
    /// Create an unbound instrument with no range limits
    pub fn new(name: impl Into<String>, output_channel: u8) -> Self {
        InstrumentSpec {
            name: name.into(),
            input_channel: None,
            output_channel,
            range_min: None,
            range_max: None,
        }
    }

    /// Bind a source channel
    pub fn with_input_channel(mut self, channel: u8) -> Self {
        self.input_channel = Some(channel);
        self
    }

    /// Limit the playable range
    pub fn with_range(mut self, range_min: Option<u8>, range_max: Option<u8>) -> Self {
        self.range_min = range_min;
        self.range_max = range_max;
        self
    }

    /// True when this instrument has an explicit source channel
    pub fn is_bound(&self) -> bool {
        self.input_channel.is_some()
    }

    /// Number of out-of-range misses a single pitch scores against this instrument
    pub fn misses_for(&self, pitch: u8) -> usize {
        let below = self.range_min.map_or(false, |min| pitch < min);
        let above = self.range_max.map_or(false, |max| pitch > max);
        below as usize + above as usize
    }
}

/// Ordered set of target instruments
///
/// Declaration order is significant: it breaks ties in the direct-binding
/// scan and the best-fit searches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    pub instruments: Vec<InstrumentSpec>,
}

impl Description {
    pub fn new(instruments: Vec<InstrumentSpec>) -> Self {
        Description { instruments }
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Look up an instrument by name
    pub fn get(&self, name: &str) -> Option<&InstrumentSpec> {
        self.instruments.iter().find(|i| i.name == name)
    }

    /// Instruments with an explicit source channel, in declaration order
    pub fn bound(&self) -> impl Iterator<Item = &InstrumentSpec> + '_ {
        self.instruments.iter().filter(|i| i.is_bound())
    }

    /// Instruments without a source channel, in declaration order
    pub fn unbound(&self) -> impl Iterator<Item = &InstrumentSpec> + '_ {
        self.instruments.iter().filter(|i| !i.is_bound())
    }
}
