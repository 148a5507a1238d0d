use tokio::io::AsyncWriteExt;

use super::{ResetOutcome, SerialSession};
use crate::error::{MacropadError, Result};
use crate::{log_error, log_info};

impl SerialSession {
    /// Writes the reset byte so the keypad reloads its configuration.
    ///
    /// A closed session skips the write without error. Concurrent calls queue on the
    /// write half, so bytes never interleave. A failed write is reported, not retried.
    pub async fn send_reset_signal(&self) -> Result<ResetOutcome> {
        if !self.is_open() {
            log_info!("Serial session closed, reset signal skipped");
            return Ok(ResetOutcome::Skipped);
        }

        let mut writer = self.writer.lock().await;
        let Some(stream) = writer.as_mut() else {
            log_info!("Serial write half released, reset signal skipped");
            return Ok(ResetOutcome::Skipped);
        };

        let signal = [self.config.reset_signal];
        let written = async {
            stream.write_all(&signal).await?;
            stream.flush().await
        }
        .await;

        match written {
            Ok(()) => {
                log_info!("Reset signal 0x{:02x} sent", self.config.reset_signal);
                Ok(ResetOutcome::Sent)
            }
            Err(e) => {
                log_error!("Failed to send reset signal: {}", e);
                Err(MacropadError::WriteFailed(e.to_string()))
            }
        }
    }
}
