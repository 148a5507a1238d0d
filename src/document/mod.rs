//! In-memory configuration document and its JSON file format.
//!
//! ```json
//! {
//!   "button_pins": { "GP0": ["CONTROL", "C"], "GP9": { "string": "hello\nworld" } },
//!   "led_intensities": [25, 50]
//! }
//! ```

mod edit;
mod escape;
mod intensity;
mod parse;
mod serialize;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{MacropadError, Result};
use crate::keycode::KeyToken;

pub use escape::{collapse_newlines, expand_newlines};
pub use intensity::{Intensity, DEFAULT_INTENSITY};

/// Which cached value of a pin is sent to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Discrete,
    Literal,
}

impl PinMode {
    pub fn flipped(self) -> Self {
        match self {
            PinMode::Discrete => PinMode::Literal,
            PinMode::Literal => PinMode::Discrete,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PinMode::Discrete => "keys",
            PinMode::Literal => "text",
        }
    }
}

/// What a pin sends when pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinOutput {
    /// A key combination, pressed together.
    Discrete(Vec<KeyToken>),
    /// Text typed out verbatim. A newline is spelled as the two characters `\n`.
    Literal(String),
}

impl PinOutput {
    pub fn mode(&self) -> PinMode {
        match self {
            PinOutput::Discrete(_) => PinMode::Discrete,
            PinOutput::Literal(_) => PinMode::Literal,
        }
    }
}

/// Storage for one pin. Both output variants are cached so flipping the mode never
/// loses what was typed in the other one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinSlot {
    pub mode: PinMode,
    pub discrete: Vec<KeyToken>,
    pub literal: String,
    pub intensity: Intensity,
}

impl PinSlot {
    pub fn new(output: PinOutput, intensity: Intensity) -> Self {
        let mut slot = Self {
            mode: output.mode(),
            discrete: Vec::new(),
            literal: String::new(),
            intensity,
        };
        slot.store(output);
        slot
    }

    /// The active output.
    pub fn output(&self) -> PinOutput {
        match self.mode {
            PinMode::Discrete => PinOutput::Discrete(self.discrete.clone()),
            PinMode::Literal => PinOutput::Literal(self.literal.clone()),
        }
    }

    /// Writes `output` into the cache of its own variant.
    fn store(&mut self, output: PinOutput) {
        match output {
            PinOutput::Discrete(keys) => self.discrete = dedup_keys(keys),
            PinOutput::Literal(text) => self.literal = collapse_newlines(&text),
        }
    }
}

/// Ordered mapping of pin id to pin slot. The pin set is fixed by whatever built the
/// document; edits never add or remove pins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigDocument {
    pins: Vec<(String, PinSlot)>,
}

impl ConfigDocument {
    /// The layout the configurator starts with before any file is loaded.
    pub fn builtin() -> Self {
        Self::default()
            .with_pin("GP0", PinOutput::Discrete(vec![KeyToken::from("E")]), Intensity::clamped(25))
            .with_pin("GP9", PinOutput::Discrete(vec![KeyToken::from("R")]), Intensity::clamped(50))
            .with_pin("GP12", PinOutput::Discrete(vec![KeyToken::from("O")]), Intensity::clamped(75))
            .with_pin("GP15", PinOutput::Discrete(vec![KeyToken::from("R")]), Intensity::clamped(100))
    }

    /// Appends a pin, replacing an existing pin of the same id in place.
    pub fn with_pin(mut self, id: impl Into<String>, output: PinOutput, intensity: Intensity) -> Self {
        let id = id.into();
        let slot = PinSlot::new(output, intensity);
        match self.pins.iter_mut().find(|(pin, _)| *pin == id) {
            Some((_, existing)) => *existing = slot,
            None => self.pins.push((id, slot)),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn contains(&self, pin: &str) -> bool {
        self.index_of(pin).is_some()
    }

    pub fn index_of(&self, pin: &str) -> Option<usize> {
        self.pins.iter().position(|(id, _)| id == pin)
    }

    pub fn pin_ids(&self) -> impl Iterator<Item = &str> {
        self.pins.iter().map(|(id, _)| id.as_str())
    }

    pub fn pins(&self) -> impl Iterator<Item = (&str, &PinSlot)> {
        self.pins.iter().map(|(id, slot)| (id.as_str(), slot))
    }

    pub fn get(&self, pin: &str) -> Option<&PinSlot> {
        self.pins.iter().find(|(id, _)| id == pin).map(|(_, slot)| slot)
    }

    pub fn pin_at(&self, index: usize) -> Option<(&str, &PinSlot)> {
        self.pins.get(index).map(|(id, slot)| (id.as_str(), slot))
    }

    pub fn intensities(&self) -> Vec<Intensity> {
        self.pins.iter().map(|(_, slot)| slot.intensity).collect()
    }

    /// The active output and intensity of every pin, in order. This is exactly what a
    /// save writes, so two documents with equal outputs produce identical files.
    pub fn outputs(&self) -> Vec<(String, PinOutput, Intensity)> {
        self.pins
            .iter()
            .map(|(id, slot)| (id.clone(), slot.output(), slot.intensity))
            .collect()
    }

    fn slot_mut(&mut self, pin: &str) -> Result<&mut PinSlot> {
        self.pins
            .iter_mut()
            .find(|(id, _)| id == pin)
            .map(|(_, slot)| slot)
            .ok_or_else(|| MacropadError::UnknownPin(pin.to_string()))
    }
}

/// On-disk shape of the configuration file.
#[derive(Debug, Serialize, Deserialize)]
struct ConfigFile {
    button_pins: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    led_intensities: Option<Vec<Value>>,
}

fn dedup_keys(keys: Vec<KeyToken>) -> Vec<KeyToken> {
    let mut unique: Vec<KeyToken> = Vec::with_capacity(keys.len());
    for key in keys {
        if !unique.contains(&key) {
            unique.push(key);
        }
    }
    unique
}
