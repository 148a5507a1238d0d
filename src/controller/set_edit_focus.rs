use super::EditController;
use crate::error::{MacropadError, Result};
use crate::log_debug;

impl EditController {
    /// Moves edit focus. Focusing the pin that already has focus clears it; `None` clears
    /// it unconditionally. At most one pin is focused at a time.
    pub fn set_edit_focus(&mut self, pin: Option<&str>) -> Result<()> {
        match pin {
            None => self.focus = None,
            Some(pin) if self.focus.as_deref() == Some(pin) => self.focus = None,
            Some(pin) => {
                if !self.document.contains(pin) {
                    return Err(MacropadError::UnknownPin(pin.to_string()));
                }
                self.focus = Some(pin.to_string());
            }
        }
        log_debug!("Edit focus: {:?}", self.focus);
        Ok(())
    }
}
