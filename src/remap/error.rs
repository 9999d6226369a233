// Remap Errors - Configuration failures surfaced by the mapping builder

use thiserror::Error;

use crate::description::DescriptionError;
use crate::pattern::MidiError;

#[derive(Debug, Error)]
pub enum RemapError {
    #[error("Description contains no instruments")]
    NoInstruments,

    #[error("No fallback instrument available: every instrument has an input_channel")]
    NoFallbackInstrument,

    #[error("Description error: {0}")]
    Description(#[from] DescriptionError),

    #[error("MIDI error: {0}")]
    Midi(#[from] MidiError),
}

pub type RemapResult<T> = Result<T, RemapError>;
