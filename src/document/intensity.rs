use std::fmt;

use serde::Serialize;

/// Intensity used for a pin that has no value from the file or from the previous document.
pub const DEFAULT_INTENSITY: u8 = 100;

/// LED brightness of a pin, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Intensity(u8);

impl Intensity {
    pub const MIN: Intensity = Intensity(0);
    pub const MAX: Intensity = Intensity(100);

    /// `None` when `value` is outside `0..=100`.
    pub fn new(value: i64) -> Option<Self> {
        (0..=100).contains(&value).then(|| Intensity(value as u8))
    }

    /// Saturates `value` into `0..=100`.
    pub fn clamped(value: i64) -> Self {
        Intensity(value.clamp(0, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn saturating_add(self, delta: i64) -> Self {
        Self::clamped(i64::from(self.0) + delta)
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Intensity(DEFAULT_INTENSITY)
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
