use super::EditController;
use crate::serial::SerialEvent;

impl EditController {
    /// Drains pending serial events into the terminal without waiting.
    /// Returns `true` when anything arrived.
    pub fn poll_serial(&mut self) -> bool {
        let mut changed = false;

        while let Ok(event) = self.serial_events.try_recv() {
            changed = true;
            match event {
                SerialEvent::Data(text) => self.terminal.append(&text),
                SerialEvent::Closed => self.set_status("Serial connection closed."),
                SerialEvent::ReadFailed(reason) => self.set_error(format!("Serial read failed: {}", reason)),
            }
        }

        changed
    }

    /// Waits for the next serial event and applies it, followed by anything else pending.
    /// Returns `false` once the session can produce no more events.
    pub async fn next_serial(&mut self) -> bool {
        match self.serial_events.recv().await {
            Some(SerialEvent::Data(text)) => self.terminal.append(&text),
            Some(SerialEvent::Closed) => self.set_status("Serial connection closed."),
            Some(SerialEvent::ReadFailed(reason)) => self.set_error(format!("Serial read failed: {}", reason)),
            None => return false,
        }
        self.poll_serial();
        true
    }
}
