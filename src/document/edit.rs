use super::{ConfigDocument, Intensity, PinMode, PinOutput};
use crate::error::Result;

impl ConfigDocument {
    /// Slider path: stores `value` clamped into `0..=100`.
    pub fn set_intensity(&mut self, pin: &str, value: i64) -> Result<Intensity> {
        let slot = self.slot_mut(pin)?;
        slot.intensity = Intensity::clamped(value);
        Ok(slot.intensity)
    }

    /// Numeric entry path: out-of-range values are rejected and nothing is stored.
    pub fn try_set_intensity(&mut self, pin: &str, value: i64) -> Result<Option<Intensity>> {
        let slot = self.slot_mut(pin)?;
        let Some(intensity) = Intensity::new(value) else {
            return Ok(None);
        };
        slot.intensity = intensity;
        Ok(Some(intensity))
    }

    pub fn adjust_intensity(&mut self, pin: &str, delta: i64) -> Result<Intensity> {
        let slot = self.slot_mut(pin)?;
        slot.intensity = slot.intensity.saturating_add(delta);
        Ok(slot.intensity)
    }

    /// Replaces the cached value of the variant `output` belongs to. The other
    /// variant's cache and the pin's mode are left alone.
    pub fn set_pin_output(&mut self, pin: &str, output: PinOutput) -> Result<()> {
        self.slot_mut(pin)?.store(output);
        Ok(())
    }

    /// Flips which cached variant is active, returning the new mode.
    pub fn toggle_mode(&mut self, pin: &str) -> Result<PinMode> {
        let slot = self.slot_mut(pin)?;
        slot.mode = slot.mode.flipped();
        Ok(slot.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MacropadError;
    use crate::keycode::KeyToken;

    #[test]
    fn test_set_intensity_clamps() {
        let mut doc = ConfigDocument::builtin();
        assert_eq!(doc.set_intensity("GP0", 150).unwrap(), Intensity::MAX);
        assert_eq!(doc.set_intensity("GP0", -5).unwrap(), Intensity::MIN);
        assert_eq!(doc.get("GP0").unwrap().intensity, Intensity::MIN);
    }

    #[test]
    fn test_try_set_intensity_rejects() {
        let mut doc = ConfigDocument::builtin();
        assert_eq!(doc.try_set_intensity("GP9", 101).unwrap(), None);
        assert_eq!(doc.get("GP9").unwrap().intensity.value(), 50);
        assert_eq!(doc.try_set_intensity("GP9", 60).unwrap(), Intensity::new(60));
    }

    #[test]
    fn test_unknown_pin() {
        let mut doc = ConfigDocument::builtin();
        let before = doc.clone();
        assert!(matches!(doc.set_intensity("GP99", 10), Err(MacropadError::UnknownPin(_))));
        assert!(matches!(doc.toggle_mode("GP99"), Err(MacropadError::UnknownPin(_))));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_toggle_mode_is_non_destructive() {
        let mut doc = ConfigDocument::builtin();
        doc.set_pin_output("GP0", PinOutput::Literal("hello".to_string())).unwrap();
        assert_eq!(doc.get("GP0").unwrap().output(), PinOutput::Discrete(vec![KeyToken::from("E")]));

        assert_eq!(doc.toggle_mode("GP0").unwrap(), PinMode::Literal);
        assert_eq!(doc.get("GP0").unwrap().output(), PinOutput::Literal("hello".to_string()));

        assert_eq!(doc.toggle_mode("GP0").unwrap(), PinMode::Discrete);
        assert_eq!(doc.get("GP0").unwrap().output(), PinOutput::Discrete(vec![KeyToken::from("E")]));
    }
}
