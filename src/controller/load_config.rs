use super::{EditController, LoadOutcome, MSG_LOAD_FAILED};
use crate::document::ConfigDocument;
use crate::error::Result;
use crate::serial::StartOutcome;
use crate::store::FileHandle;
use crate::{log_error, log_info, log_warn};

impl EditController {
    /// Picks a file, parses it over the held document and starts the serial session.
    ///
    /// Picking, reading and parsing happen before anything is replaced: if one of them
    /// fails the held document, file and focus are untouched. A cancelled pick returns
    /// `UserCancelled` without a status message. Failing to start the serial session does
    /// not undo the load.
    pub async fn load_config(&mut self) -> Result<LoadOutcome> {
        let (file, document) = match self.read_config().await {
            Ok(loaded) => loaded,
            Err(e) if e.is_cancelled() => {
                log_info!("Configuration load cancelled");
                return Err(e);
            }
            Err(e) => {
                log_error!("Failed to load configuration: {}", e);
                self.set_error(format!("{} {}", MSG_LOAD_FAILED, e));
                return Err(e);
            }
        };

        let name = file.name();
        self.document = document;
        self.file = Some(file);
        if self.focus.as_deref().is_some_and(|pin| !self.document.contains(pin)) {
            self.focus = None;
        }
        log_info!("Loaded configuration {} ({} pins)", name, self.document.len());

        let serial = match self.session.start().await {
            Ok(outcome) => {
                match &outcome {
                    StartOutcome::Opened(device) | StartOutcome::Reopened(device) => {
                        self.set_status(format!("Loaded {}. Connected to {}.", name, device));
                    }
                    StartOutcome::AlreadyOpen => self.set_status(format!("Loaded {}.", name)),
                }
                Some(outcome)
            }
            Err(e) if e.is_cancelled() => {
                self.set_status(format!("Loaded {}. No serial device selected.", name));
                None
            }
            Err(e) => {
                log_warn!("Serial session not started: {}", e);
                self.set_error(format!("Loaded {}. {}", name, e));
                None
            }
        };

        Ok(LoadOutcome { file: name, serial })
    }

    async fn read_config(&self) -> Result<(Box<dyn FileHandle>, ConfigDocument)> {
        let file = self.store.pick_readable_file().await?;
        let bytes = file.read_all().await?;
        let document = ConfigDocument::parse_merged(&bytes, &self.document)?;
        Ok((file, document))
    }
}
