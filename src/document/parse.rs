use serde_json::Value;

use super::{collapse_newlines, ConfigDocument, ConfigFile, Intensity, PinOutput};
use crate::error::{MacropadError, Result};
use crate::keycode::KeyToken;
use crate::log_debug;

impl ConfigDocument {
    /// Parses a configuration file. Pins without an intensity in the file take the
    /// intensities of the built-in layout, position by position.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        Self::parse_merged(bytes, &ConfigDocument::builtin())
    }

    /// Parses a configuration file on top of `previous`.
    ///
    /// `button_pins` fully replaces the pin set. `led_intensities` is merged by
    /// position: when the field is absent, or shorter than the pin list, the missing
    /// positions keep the intensity `previous` held at that position.
    pub fn parse_merged(bytes: &[u8], previous: &ConfigDocument) -> Result<Self> {
        let file: ConfigFile = serde_json::from_slice(bytes)
            .map_err(|e| MacropadError::MalformedConfig(e.to_string()))?;

        let from_file = match &file.led_intensities {
            Some(values) => values
                .iter()
                .map(parse_intensity)
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };
        let held = previous.intensities();

        let mut document = ConfigDocument::default();
        for (position, (pin, value)) in file.button_pins.iter().enumerate() {
            let output = parse_pin(pin, value)?;
            let intensity = from_file
                .get(position)
                .or_else(|| held.get(position))
                .copied()
                .unwrap_or_default();
            document = document.with_pin(pin.as_str(), output, intensity);
        }

        log_debug!(
            "Parsed configuration: {} pins, led_intensities {}",
            document.len(),
            if file.led_intensities.is_some() { "present" } else { "absent" }
        );

        Ok(document)
    }
}

fn parse_pin(pin: &str, value: &Value) -> Result<PinOutput> {
    let invalid = || MacropadError::InvalidPinShape { pin: pin.to_string() };

    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(KeyToken::new).ok_or_else(invalid))
            .collect::<Result<Vec<_>>>()
            .map(PinOutput::Discrete),
        Value::Object(fields) => fields
            .get("string")
            .and_then(Value::as_str)
            .map(|text| PinOutput::Literal(collapse_newlines(text)))
            .ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

fn parse_intensity(value: &Value) -> Result<Intensity> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
        .map(Intensity::clamped)
        .ok_or_else(|| MacropadError::MalformedConfig(format!("led intensity {} is not an integer", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PinMode;

    fn values(doc: &ConfigDocument) -> Vec<u8> {
        doc.intensities().iter().map(|i| i.value()).collect()
    }

    #[test]
    fn test_discrete_and_literal_pins() {
        let doc = ConfigDocument::parse(
            br#"{"button_pins": {"GP1": ["CONTROL", "C"], "GP2": {"string": "hi\nbye"}}, "led_intensities": [10, 20]}"#,
        )
        .unwrap();

        let gp1 = doc.get("GP1").unwrap();
        assert_eq!(gp1.mode, PinMode::Discrete);
        assert_eq!(gp1.discrete, vec![KeyToken::from("CONTROL"), KeyToken::from("C")]);

        let gp2 = doc.get("GP2").unwrap();
        assert_eq!(gp2.mode, PinMode::Literal);
        assert_eq!(gp2.literal, "hi\\nbye");
        assert_eq!(values(&doc), vec![10, 20]);
    }

    #[test]
    fn test_pin_order_follows_file() {
        let doc = ConfigDocument::parse(br#"{"button_pins": {"GP15": [], "GP0": [], "GP9": []}}"#).unwrap();
        assert_eq!(doc.pin_ids().collect::<Vec<_>>(), vec!["GP15", "GP0", "GP9"]);
    }

    #[test]
    fn test_not_json() {
        let err = ConfigDocument::parse(b"{ nope").unwrap_err();
        assert!(matches!(err, MacropadError::MalformedConfig(_)));
    }

    #[test]
    fn test_missing_button_pins() {
        let err = ConfigDocument::parse(br#"{"led_intensities": [1]}"#).unwrap_err();
        assert!(matches!(err, MacropadError::MalformedConfig(_)));
    }

    #[test]
    fn test_invalid_pin_shapes() {
        for body in [
            r#"{"button_pins": {"GP3": "A"}}"#,
            r#"{"button_pins": {"GP3": 7}}"#,
            r#"{"button_pins": {"GP3": {"text": "x"}}}"#,
            r#"{"button_pins": {"GP3": ["A", 1]}}"#,
        ] {
            match ConfigDocument::parse(body.as_bytes()) {
                Err(MacropadError::InvalidPinShape { pin }) => assert_eq!(pin, "GP3"),
                other => panic!("expected InvalidPinShape for {}, got {:?}", body, other),
            }
        }
    }

    #[test]
    fn test_missing_intensities_keep_previous() {
        let previous = ConfigDocument::parse(br#"{"button_pins": {"A": [], "B": []}, "led_intensities": [7, 8]}"#).unwrap();
        let doc = ConfigDocument::parse_merged(br#"{"button_pins": {"X": ["Q"], "Y": []}}"#, &previous).unwrap();
        assert_eq!(values(&doc), vec![7, 8]);
    }

    #[test]
    fn test_short_intensity_list_is_padded() {
        let previous = ConfigDocument::builtin();
        let doc = ConfigDocument::parse_merged(
            br#"{"button_pins": {"A": [], "B": [], "C": [], "D": [], "E": []}, "led_intensities": [1]}"#,
            &previous,
        )
        .unwrap();
        assert_eq!(values(&doc), vec![1, 50, 75, 100, 100]);
    }

    #[test]
    fn test_intensities_are_clamped() {
        let doc = ConfigDocument::parse(br#"{"button_pins": {"A": [], "B": []}, "led_intensities": [250, -3]}"#).unwrap();
        assert_eq!(values(&doc), vec![100, 0]);
    }

    #[test]
    fn test_non_integer_intensity() {
        let err = ConfigDocument::parse(br#"{"button_pins": {"A": []}, "led_intensities": ["bright"]}"#).unwrap_err();
        assert!(matches!(err, MacropadError::MalformedConfig(_)));
    }
}
