use super::EditController;
use crate::document::{PinMode, PinOutput};
use crate::error::{MacropadError, Result};

impl EditController {
    /// Stores `text` as the pin's literal output. Newline characters are held as the `\n`
    /// escape, which is expanded only when the document is serialized.
    ///
    /// Returns `false` without changing anything when the pin is in discrete mode.
    pub fn set_literal_text(&mut self, pin: &str, text: impl Into<String>) -> Result<bool> {
        let slot = self
            .document
            .get(pin)
            .ok_or_else(|| MacropadError::UnknownPin(pin.to_string()))?;
        if slot.mode != PinMode::Literal {
            return Ok(false);
        }
        self.document.set_pin_output(pin, PinOutput::Literal(text.into()))?;
        Ok(true)
    }
}
