// Description Loader - Parses the instrument description document
// Keeps instruments in document order; malformed optional fields read as absent

use serde_json::{Map, Value};
use std::path::Path;
use thiserror::Error;

use super::types::{Description, InstrumentSpec};

/// Highest MIDI channel number (0-indexed)
const MAX_CHANNEL: i64 = 15;

/// Highest MIDI key number
const MAX_PITCH: i64 = 127;

#[derive(Debug, Error)]
pub enum DescriptionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Description document must be a JSON object")]
    NotAnObject,

    #[error("Description document has no \"instruments\" key")]
    MissingInstruments,

    #[error("\"instruments\" must be an object of name -> instrument")]
    InstrumentsNotAnObject,

    #[error("Instrument '{name}' is invalid: {reason}")]
    InvalidInstrument { name: String, reason: String },
}

pub type DescriptionResult<T> = Result<T, DescriptionError>;

impl Description {
    /// Load a description document from disk
    pub fn load(path: &Path) -> DescriptionResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let description = Self::from_json_str(&text)?;
        log::debug!(
            "Loaded {} instruments from {}",
            description.len(),
            path.display()
        );
        Ok(description)
    }

    /// Parse a description document from JSON text
    pub fn from_json_str(text: &str) -> DescriptionResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Build a description from an already-parsed document
    pub fn from_value(value: &Value) -> DescriptionResult<Self> {
        let root = value.as_object().ok_or(DescriptionError::NotAnObject)?;
        let instruments = root
            .get("instruments")
            .ok_or(DescriptionError::MissingInstruments)?
            .as_object()
            .ok_or(DescriptionError::InstrumentsNotAnObject)?;

        let instruments = instruments
            .iter()
            .map(|(name, fields)| parse_instrument(name, fields))
            .collect::<DescriptionResult<Vec<_>>>()?;

        Ok(Description::new(instruments))
    }
}

fn parse_instrument(name: &str, fields: &Value) -> DescriptionResult<InstrumentSpec> {
    let invalid = |reason: &str| DescriptionError::InvalidInstrument {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let fields = fields
        .as_object()
        .ok_or_else(|| invalid("instrument must be an object"))?;

    let output_channel = bounded_int(fields, "output_channel", MAX_CHANNEL)
        .ok_or_else(|| invalid("output_channel must be an integer in 0..=15"))?;

    Ok(InstrumentSpec {
        name: name.to_string(),
        input_channel: bounded_int(fields, "input_channel", MAX_CHANNEL),
        output_channel,
        range_min: bounded_int(fields, "range_min", MAX_PITCH),
        range_max: bounded_int(fields, "range_max", MAX_PITCH),
    })
}

/// Read an integer field in 0..=max; anything else counts as absent
fn bounded_int(fields: &Map<String, Value>, key: &str, max: i64) -> Option<u8> {
    fields
        .get(key)
        .and_then(Value::as_i64)
        .filter(|v| (0..=max).contains(v))
        .map(|v| v as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "instruments": {
            "zeta_drums": { "input_channel": 9, "output_channel": 9 },
            "bass": { "output_channel": 2, "range_min": 36, "range_max": 60 },
            "alpha_lead": { "output_channel": 3, "range_min": 60 }
        }
    }"#;

    #[test]
    fn test_parse_preserves_document_order() {
        let description = Description::from_json_str(SAMPLE).unwrap();
        let names: Vec<&str> = description.instruments.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["zeta_drums", "bass", "alpha_lead"]);
    }

    #[test]
    fn test_parse_fields() {
        let description = Description::from_json_str(SAMPLE).unwrap();

        let drums = description.get("zeta_drums").unwrap();
        assert_eq!(drums.input_channel, Some(9));
        assert_eq!(drums.output_channel, 9);
        assert_eq!(drums.range_min, None);

        let lead = description.get("alpha_lead").unwrap();
        assert_eq!(lead.input_channel, None);
        assert_eq!(lead.range_min, Some(60));
        assert_eq!(lead.range_max, None);
    }

    #[test]
    fn test_malformed_optional_fields_are_absent() {
        let text = r#"{
            "instruments": {
                "odd": {
                    "input_channel": "nine",
                    "output_channel": 4,
                    "range_min": null,
                    "range_max": 400
                }
            }
        }"#;
        let description = Description::from_json_str(text).unwrap();
        let odd = description.get("odd").unwrap();
        assert_eq!(odd.input_channel, None);
        assert_eq!(odd.range_min, None);
        assert_eq!(odd.range_max, None);
    }

    #[test]
    fn test_structural_errors() {
        assert!(matches!(
            Description::from_json_str("[1, 2]"),
            Err(DescriptionError::NotAnObject)
        ));
        assert!(matches!(
            Description::from_json_str(r#"{"tracks": {}}"#),
            Err(DescriptionError::MissingInstruments)
        ));
        assert!(matches!(
            Description::from_json_str(r#"{"instruments": []}"#),
            Err(DescriptionError::InstrumentsNotAnObject)
        ));
        assert!(matches!(
            Description::from_json_str("{"),
            Err(DescriptionError::Json(_))
        ));
    }

    #[test]
    fn test_missing_output_channel_is_invalid() {
        let result = Description::from_json_str(r#"{"instruments": {"ghost": {"range_min": 10}}}"#);
        match result {
            Err(DescriptionError::InvalidInstrument { name, .. }) => assert_eq!(name, "ghost"),
            other => panic!("Expected InvalidInstrument, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_instruments_parses() {
        let description = Description::from_json_str(r#"{"instruments": {}}"#).unwrap();
        assert!(description.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let description = Description::load(file.path()).unwrap();
        assert_eq!(description.len(), 3);
    }
}
