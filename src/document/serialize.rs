use serde_json::{json, Map, Value};

use super::{expand_newlines, ConfigDocument, ConfigFile, PinMode};
use crate::error::Result;

impl ConfigDocument {
    /// Renders the document as the pretty-printed JSON configuration file.
    ///
    /// Only the active variant of each pin is written. Literal text has its `\n`
    /// escapes expanded into real newlines.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut button_pins = Map::new();
        for (pin, slot) in &self.pins {
            let value = match slot.mode {
                PinMode::Discrete => json!(slot.discrete),
                PinMode::Literal => json!({ "string": expand_newlines(&slot.literal) }),
            };
            button_pins.insert(pin.clone(), value);
        }

        let led_intensities = self
            .pins
            .iter()
            .map(|(_, slot)| Value::from(slot.intensity.value()))
            .collect();

        let file = ConfigFile {
            button_pins,
            led_intensities: Some(led_intensities),
        };

        Ok(serde_json::to_vec_pretty(&file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Intensity, PinOutput};
    use crate::keycode::KeyToken;

    fn sample() -> ConfigDocument {
        ConfigDocument::default()
            .with_pin("GP1", PinOutput::Discrete(vec![KeyToken::from("E"), KeyToken::from("R")]), Intensity::clamped(25))
            .with_pin("GP2", PinOutput::Literal("hi\\nbye".to_string()), Intensity::clamped(80))
    }

    #[test]
    fn test_payload_shape() {
        let bytes = sample().serialize().unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["button_pins"]["GP1"], json!(["E", "R"]));
        assert_eq!(value["button_pins"]["GP2"]["string"], json!("hi\nbye"));
        assert_eq!(value["led_intensities"], json!([25, 80]));
    }

    #[test]
    fn test_literal_holds_real_newline() {
        let bytes = sample().serialize().unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        let text = value["button_pins"]["GP2"]["string"].as_str().unwrap();
        assert!(text.contains('\n'));
        assert!(!text.contains("\\n"));
    }

    #[test]
    fn test_pretty_two_space_indent_in_pin_order() {
        let text = String::from_utf8(sample().serialize().unwrap()).unwrap();
        assert!(text.starts_with("{\n  \"button_pins\": {\n    \"GP1\": ["));
        assert!(text.find("\"GP1\"").unwrap() < text.find("\"GP2\"").unwrap());
        assert!(text.find("button_pins").unwrap() < text.find("led_intensities").unwrap());
    }

    #[test]
    fn test_round_trip() {
        let doc = sample();
        let back = ConfigDocument::parse(&doc.serialize().unwrap()).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_inactive_variant_is_not_written() {
        let mut doc = sample();
        doc.toggle_mode("GP1").unwrap();
        let value: Value = serde_json::from_slice(&doc.serialize().unwrap()).unwrap();
        assert_eq!(value["button_pins"]["GP1"], json!({ "string": "" }));
    }
}
