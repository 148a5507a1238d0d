use super::EditController;
use crate::document::PinMode;
use crate::error::Result;
use crate::log_debug;

impl EditController {
    /// Flips the pin between key list and literal text. Both cached values survive the
    /// flip. The pin gains edit focus unless it already has it.
    pub fn toggle_mode(&mut self, pin: &str) -> Result<PinMode> {
        let mode = self.document.toggle_mode(pin)?;
        if self.focus.as_deref() != Some(pin) {
            self.focus = Some(pin.to_string());
        }
        log_debug!("{} now in {} mode", pin, mode.label());
        Ok(mode)
    }
}
