use super::EditController;
use crate::document::{PinMode, PinOutput};
use crate::error::{MacropadError, Result};
use crate::keycode::{normalize, toggle, KeyToken, RawKey};
use crate::log_debug;

impl EditController {
    /// Toggles the captured key in the focused pin's key list.
    ///
    /// Returns the token that was toggled, or `None` when nothing is focused or the focused
    /// pin is in literal mode.
    pub fn capture_key(&mut self, raw: &RawKey) -> Result<Option<KeyToken>> {
        let Some(pin) = self.focus.clone() else {
            return Ok(None);
        };
        let slot = self
            .document
            .get(&pin)
            .ok_or_else(|| MacropadError::UnknownPin(pin.clone()))?;
        if slot.mode != PinMode::Discrete {
            return Ok(None);
        }

        let token = normalize(raw);
        let keys = toggle(&slot.discrete, &token);
        self.document.set_pin_output(&pin, PinOutput::Discrete(keys))?;
        log_debug!("Captured {} on {}", token, pin);
        Ok(Some(token))
    }
}
