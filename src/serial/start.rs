use std::sync::Arc;

use super::{SerialSession, SessionState, StartOutcome, TransportHandle};
use crate::error::Result;
use crate::{log_info, log_warn};

impl SerialSession {
    /// Opens the session and starts its read loop.
    ///
    /// - open with a live read loop: no-op
    /// - a device was opened before (its stream ended or died): re-opened in place
    /// - never opened: a device is requested from the transport, then opened
    pub async fn start(&mut self) -> Result<StartOutcome> {
        if self.state() == SessionState::Open {
            if self.is_reading() {
                return Ok(StartOutcome::AlreadyOpen);
            }
            log_warn!("Serial session open but its stream is no longer readable, re-opening");
        }

        match self.handle.clone() {
            Some(handle) => {
                self.open_with(handle.clone()).await?;
                Ok(StartOutcome::Reopened(handle.name()))
            }
            None => {
                self.set_state(SessionState::Opening);
                let handle: Arc<dyn TransportHandle> = match self.transport.request_device().await {
                    Ok(handle) => Arc::from(handle),
                    Err(e) => {
                        self.set_state(SessionState::Closed);
                        return Err(e);
                    }
                };
                self.open_with(handle.clone()).await?;
                Ok(StartOutcome::Opened(handle.name()))
            }
        }
    }

    async fn open_with(&mut self, handle: Arc<dyn TransportHandle>) -> Result<()> {
        self.set_state(SessionState::Opening);
        if let Some(stale) = self.reader.take() {
            stale.abort();
        }
        let generation = self.next_generation();

        let streams = match handle.open(self.config.baud_rate).await {
            Ok(streams) => streams,
            Err(e) => {
                self.set_state(SessionState::Closed);
                return Err(e);
            }
        };

        *self.writer.lock().await = Some(streams.writer);
        self.handle = Some(handle.clone());
        self.set_state(SessionState::Open);
        self.reader = Some(self.spawn_read_loop(streams.reader, generation));

        log_info!("Serial session open on {}", handle.name());
        Ok(())
    }
}
