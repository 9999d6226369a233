// Description - Target instrument set for remapping
// Instrument records and the JSON document loader

pub mod types;
pub mod loader;

// Re-export main types
pub use types::{Description, InstrumentSpec};
pub use loader::{DescriptionError, DescriptionResult};
