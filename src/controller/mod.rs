//! Edit controller: owns the held configuration, the loaded file, edit focus, the serial
//! session and its terminal output. User operations run one at a time through `&mut self`.

mod capture_key;
mod intensity;
mod load_config;
mod poll_serial;
mod save_config;
mod set_edit_focus;
mod set_literal_text;
mod toggle_mode;

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::document::{ConfigDocument, PinSlot};
use crate::serial::{SerialConfig, SerialEvent, SerialSession, SerialTransport, StartOutcome, TerminalBuffer};
use crate::store::{FileHandle, FileStore};

pub const MSG_SAVED: &str = "Configuration file saved successfully.";
pub const MSG_LOAD_FAILED: &str = "Could not load the configuration file.";
pub const MSG_NO_FILE: &str = "No configuration file loaded. Please load a file first.";
pub const MSG_RESET_FAILED: &str = "Could not send reset signal.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub file: String,
    /// `None` when the serial session could not be started. The configuration is loaded
    /// regardless.
    pub serial: Option<StartOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written, and the device was told to reload.
    Signalled,
    /// Written; no serial session was open.
    SignalSkipped,
    /// Written, but the reset byte could not be sent.
    SignalFailed(String),
}

/// How the status line should read: a plain outcome or a failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusKind {
    #[default]
    Info,
    Error,
}

pub struct EditController {
    document: ConfigDocument,
    file: Option<Box<dyn FileHandle>>,
    store: Arc<dyn FileStore>,
    session: SerialSession,
    serial_events: mpsc::UnboundedReceiver<SerialEvent>,
    focus: Option<String>,
    terminal: TerminalBuffer,
    status: Option<String>,
    status_kind: StatusKind,
}

impl EditController {
    /// Starts out holding the built-in layout with no file loaded and the serial session closed.
    pub fn new(store: Arc<dyn FileStore>, transport: Arc<dyn SerialTransport>, serial: SerialConfig) -> Self {
        let (session, serial_events) = SerialSession::new(transport, serial);

        Self {
            document: ConfigDocument::builtin(),
            file: None,
            store,
            session,
            serial_events,
            focus: None,
            terminal: TerminalBuffer::new(),
            status: None,
            status_kind: StatusKind::Info,
        }
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn focused_slot(&self) -> Option<(&str, &PinSlot)> {
        let pin = self.focus.as_deref()?;
        self.document.get(pin).map(|slot| (pin, slot))
    }

    pub fn file_name(&self) -> Option<String> {
        self.file.as_ref().map(|file| file.name())
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    pub fn session(&self) -> &SerialSession {
        &self.session
    }

    pub fn terminal(&self) -> &TerminalBuffer {
        &self.terminal
    }

    pub fn clear_terminal(&mut self) {
        self.terminal.clear();
    }

    /// One-line outcome of the most recent operation.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn status_kind(&self) -> StatusKind {
        self.status_kind
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
        self.status_kind = StatusKind::Info;
    }

    /// Like [`EditController::set_status`], for failures.
    pub fn set_error(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
        self.status_kind = StatusKind::Error;
    }

    /// Stops the serial session and folds its final events into the terminal.
    pub async fn shutdown(&mut self) {
        self.session.stop().await;
        self.poll_serial();
    }
}

impl std::fmt::Debug for EditController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditController")
            .field("file", &self.file_name())
            .field("focus", &self.focus)
            .field("pins", &self.document.len())
            .field("session", &self.session)
            .field("status", &self.status)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::serial::testing::ScriptedTransport;
    use crate::store::LocalFileStore;

    /// A controller with nothing selected to load and a scripted serial transport.
    pub fn controller() -> (EditController, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::default());
        let controller = EditController::new(
            Arc::new(LocalFileStore::new(None)),
            transport.clone(),
            SerialConfig::default(),
        );
        (controller, transport)
    }
}
