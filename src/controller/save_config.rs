use super::{EditController, SaveOutcome, MSG_NO_FILE, MSG_RESET_FAILED, MSG_SAVED};
use crate::error::{MacropadError, Result};
use crate::serial::ResetOutcome;
use crate::{log_error, log_info, log_warn};

impl EditController {
    /// Writes the held document back to the loaded file, then tells the device to reload.
    ///
    /// The reset signal is only sent after the writable stream has been closed
    /// successfully. Any failure before that point aborts the save without signalling.
    pub async fn save_config(&mut self) -> Result<SaveOutcome> {
        let Some(file) = self.file.as_ref() else {
            log_warn!("Save requested with no configuration file loaded");
            self.set_error(MSG_NO_FILE);
            return Err(MacropadError::NoFileLoaded);
        };
        let name = file.name();

        let written = async {
            let bytes = self.document.serialize()?;
            let mut stream = file.open_writable().await?;
            stream.write_all(&bytes).await?;
            stream.close().await
        }
        .await;

        if let Err(e) = written {
            log_error!("Failed to save {}: {}", name, e);
            self.set_error(format!("Could not save the configuration file. {}", e));
            return Err(e);
        }
        log_info!("Saved configuration to {}", name);

        let outcome = match self.session.send_reset_signal().await {
            Ok(ResetOutcome::Sent) => SaveOutcome::Signalled,
            Ok(ResetOutcome::Skipped) => SaveOutcome::SignalSkipped,
            Err(e) => SaveOutcome::SignalFailed(e.to_string()),
        };

        match &outcome {
            SaveOutcome::SignalFailed(reason) => {
                log_error!("Reset signal after save failed: {}", reason);
                self.set_error(format!("{} {}", MSG_SAVED, MSG_RESET_FAILED));
            }
            _ => self.set_status(MSG_SAVED),
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::testing::controller;
    use crate::serial::testing::ScriptedTransport;
    use crate::serial::SerialConfig;
    use crate::store::LocalFileStore;
    use std::sync::Arc;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_save_without_file_is_rejected() {
        let (mut controller, transport) = controller();
        assert!(matches!(controller.save_config().await, Err(MacropadError::NoFileLoaded)));
        assert_eq!(controller.status(), Some(MSG_NO_FILE));
        assert_eq!(transport.requests(), 0);
    }

    #[tokio::test]
    async fn test_save_writes_file_then_signals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("macropad.json");
        std::fs::write(&path, r#"{"button_pins": {"GP1": ["E"]}, "led_intensities": [25]}"#).unwrap();

        let transport = Arc::new(ScriptedTransport::default());
        let mut controller = EditController::new(
            Arc::new(LocalFileStore::new(Some(path.clone()))),
            transport.clone(),
            SerialConfig::default(),
        );
        controller.load_config().await.unwrap();
        let mut device = transport.device();

        controller.set_intensity("GP1", 80).unwrap();
        assert_eq!(controller.save_config().await.unwrap(), SaveOutcome::Signalled);
        assert_eq!(controller.status(), Some(MSG_SAVED));

        let saved: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(saved["led_intensities"], serde_json::json!([80]));

        let mut byte = [0u8; 1];
        device.read_exact(&mut byte).await.unwrap();
        assert_eq!(byte, [b'1']);
    }

    #[tokio::test]
    async fn test_save_with_closed_session_skips_signal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("macropad.json");
        std::fs::write(&path, r#"{"button_pins": {"GP1": ["E"]}}"#).unwrap();

        let transport = Arc::new(ScriptedTransport {
            cancel: true,
            ..Default::default()
        });
        let mut controller = EditController::new(
            Arc::new(LocalFileStore::new(Some(path))),
            transport,
            SerialConfig::default(),
        );
        controller.load_config().await.unwrap();
        assert_eq!(controller.save_config().await.unwrap(), SaveOutcome::SignalSkipped);
    }
}
