use tokio::io::AsyncWriteExt;

use super::{SerialEvent, SerialSession, SessionState};
use crate::{log_debug, log_info};

impl SerialSession {
    /// Closes the session and forgets the device. The next `start` requests a new one.
    pub async fn stop(&mut self) {
        // Take ownership away from the read loop before it can report a close of its own.
        self.next_generation();
        if let Some(reader) = self.reader.take() {
            reader.abort();
            let _ = reader.await;
        }
        let was_open = self.state() != SessionState::Closed;
        self.set_state(SessionState::Closed);

        if let Some(mut writer) = self.writer.lock().await.take() {
            if let Err(e) = writer.shutdown().await {
                log_debug!("Serial writer shutdown failed: {}", e);
            }
        }

        if let Some(handle) = self.handle.take() {
            log_info!("Serial session on {} stopped", handle.name());
        }
        if was_open {
            let _ = self.events.send(SerialEvent::Closed);
        }
    }
}
