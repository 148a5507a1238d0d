use super::EditController;
use crate::document::{Intensity, DEFAULT_INTENSITY};
use crate::error::Result;
use crate::log_warn;

impl EditController {
    /// Slider path: out-of-range values are clamped into 0..=100.
    pub fn set_intensity(&mut self, pin: &str, value: i64) -> Result<Intensity> {
        self.document.set_intensity(pin, value)
    }

    /// Typed-entry path: out-of-range values are rejected and the held value is kept.
    pub fn try_set_intensity(&mut self, pin: &str, value: i64) -> Result<Option<Intensity>> {
        let stored = self.document.try_set_intensity(pin, value)?;
        if stored.is_none() {
            log_warn!("Rejected intensity {} for {}", value, pin);
            self.set_error(format!(
                "Intensity must be between {} and {}.",
                Intensity::MIN,
                Intensity::MAX
            ));
        }
        Ok(stored)
    }

    pub fn adjust_intensity(&mut self, pin: &str, delta: i64) -> Result<Intensity> {
        self.document.adjust_intensity(pin, delta)
    }

    pub fn reset_intensity(&mut self, pin: &str) -> Result<Intensity> {
        self.document.set_intensity(pin, i64::from(DEFAULT_INTENSITY))
    }
}
